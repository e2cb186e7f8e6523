use schemars::JsonSchema;
use serde::Deserialize;

use super::format::{self, NO_CLIENTS};
use super::{IdArgument, NoArguments, Query, row_id};
use crate::store::Store;

/// `listAllClients`
pub struct ListAllClients;

impl Query for ListAllClients {
    const NAME: &'static str = "listAllClients";
    const DESCRIPTION: &'static str =
        "Returns the list of all clients in the database.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let clients = store.clients();
        if clients.is_empty() {
            return NO_CLIENTS.to_owned();
        }
        clients
            .iter()
            .map(format::client_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `getClientById`
pub struct GetClientById;

impl Query for GetClientById {
    const NAME: &'static str = "getClientById";
    const DESCRIPTION: &'static str = "Returns the client with the given ID.";
    type Input = IdArgument;

    fn run(store: &Store, input: IdArgument) -> String {
        match row_id(input.id).and_then(|id| store.client(id)) {
            Some(client) => format::client_with_registration(&client),
            None => format::client_not_found(input.id),
        }
    }
}

/// `getClientCount`
pub struct GetClientCount;

impl Query for GetClientCount {
    const NAME: &'static str = "getClientCount";
    const DESCRIPTION: &'static str =
        "Returns the number of clients in the database.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        format!("Number of clients in the database: {}", store.client_count())
    }
}

/// Input of [`SearchClientByEmail`].
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EmailArgument {
    #[schemars(description = "The client's email address.")]
    email: String,
}

/// `searchClientByEmail`
pub struct SearchClientByEmail;

impl Query for SearchClientByEmail {
    const NAME: &'static str = "searchClientByEmail";
    const DESCRIPTION: &'static str = "Finds a client by email address.";
    type Input = EmailArgument;

    fn run(store: &Store, input: EmailArgument) -> String {
        match store.client_by_email(&input.email) {
            Some(client) => format::client_line(&client),
            None => format!("Client not found with email: {}", input.email),
        }
    }
}

/// Input of [`SearchClientByName`].
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NameArgument {
    #[schemars(description = "First or last name to search for.")]
    name: String,
}

/// `searchClientByName`
pub struct SearchClientByName;

impl Query for SearchClientByName {
    const NAME: &'static str = "searchClientByName";
    const DESCRIPTION: &'static str =
        "Finds clients whose first or last name contains the given text.";
    type Input = NameArgument;

    fn run(store: &Store, input: NameArgument) -> String {
        let clients = store.search_clients_by_name(&input.name);
        if clients.is_empty() {
            return format!("No clients matching: {}", input.name);
        }
        let mut out = String::from("Clients found:");
        for client in &clients {
            out.push('\n');
            out.push_str(&format::client_match_line(client));
        }
        out
    }
}
