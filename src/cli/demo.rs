//! Sample data walkthrough
//!
//! Seeds a `users` collection with a few employees and reads them back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::output::Output;
use crate::storage::Store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub name: String,
    pub age: String,
    pub contact: String,
    pub company: String,
    pub address: Address,
}

impl User {
    fn new(name: &str, age: &str, contact: &str, company: &str, address: [&str; 4]) -> Self {
        let [city, state, country, pincode] = address;
        Self {
            name: name.to_string(),
            age: age.to_string(),
            contact: contact.to_string(),
            company: company.to_string(),
            address: Address {
                city: city.to_string(),
                state: state.to_string(),
                country: country.to_string(),
                pincode: pincode.to_string(),
            },
        }
    }
}

pub const COLLECTION: &str = "users";

/// The sample employees written by `fileshelf demo`
pub fn sample_users() -> Vec<User> {
    vec![
        User::new("John", "23", "9354074216", "RUKTIFY", ["Bangalore", "Karnataka", "India", "42019"]),
        User::new("Alice", "29", "8789674123", "TechFlow", ["San Francisco", "California", "USA", "94105"]),
        User::new("Bob", "35", "9078563412", "DataCorp", ["New York", "New York", "USA", "10001"]),
    ]
}

pub fn run(store: &Store, output: &Output) -> Result<()> {
    for user in sample_users() {
        tracing::debug!(name = %user.name, "Writing sample user");
        store
            .write(COLLECTION, &user.name, &user)
            .with_context(|| format!("Failed to write user {}", user.name))?;
    }

    let bodies = store
        .read_all(COLLECTION)
        .context("Failed to read back users")?;
    if bodies.is_empty() {
        tracing::warn!("No records found in the users collection");
    } else {
        tracing::info!(count = bodies.len(), "Found records");
    }

    let mut users = Vec::with_capacity(bodies.len());
    for body in &bodies {
        match store.decode::<User>(body) {
            Ok(user) => users.push(user),
            Err(e) => output.error(&format!("Skipping unreadable user: {}", e)),
        }
    }
    users.sort_by(|a, b| a.name.cmp(&b.name));

    if output.is_json() {
        output.data(&users);
    } else {
        println!("Seeded {} users into '{}':", users.len(), COLLECTION);
        for user in &users {
            println!(
                "  {:<8} {:>3}  {:<10} {}, {}",
                user.name, user.age, user.company, user.address.city, user.address.country
            );
        }
    }

    Ok(())
}
