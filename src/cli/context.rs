use std::io::{self, Write};

use rusqlite::Connection;

use crate::auth::{NonceRegistry, RoleSet};
use crate::db::listing_repo::SqliteListings;
use crate::error::CrmError;
use crate::model::{Contact, Id};
use crate::notice::NoticeBoard;
use crate::ops::{ServiceConfig, ServiceContext};
use crate::queries::contact_queries;

/// Owns the long-lived pieces a CLI session needs and lends them out as a
/// `ServiceContext` per command.
pub struct CliContext {
    pub conn: Connection,
    pub config: ServiceConfig,
    pub access: RoleSet,
    pub nonces: NonceRegistry,
    pub notices: NoticeBoard,
}

impl CliContext {
    pub fn new(conn: Connection) -> Self {
        let config = ServiceConfig::default();
        // The local operator holds the one capability the service checks.
        let access = RoleSet::new().grant(&config.required_capability);
        Self {
            conn,
            config,
            access,
            nonces: NonceRegistry::new(),
            notices: NoticeBoard::new(),
        }
    }

    /// Build a request-scoped service context and run `f` against it.
    pub fn with_service<R>(&self, f: impl FnOnce(&ServiceContext<'_>) -> R) -> R {
        let listings = SqliteListings::new(&self.conn);
        let ctx = ServiceContext {
            conn: &self.conn,
            config: &self.config,
            access: &self.access,
            tokens: &self.nonces,
            notices: &self.notices,
            listings: &listings,
        };
        f(&ctx)
    }

    pub fn token(&self, scope: &str) -> String {
        self.nonces.issue(scope)
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Print an error plus any notices the failed operation queued, leaving
    /// the board clean for the next command.
    pub fn print_error(&self, e: &CrmError) {
        eprintln!("Error: {}", e);
        for notice in self.notices.drain() {
            eprintln!("  [{}] {}", notice.code, notice.message);
        }
    }

    /// Resolve an id or name fragment to a single contact. Prints a message
    /// when nothing (or too much) matches.
    pub fn find_contact(&self, query: &str) -> Option<Contact> {
        let query = query.trim();
        if query.is_empty() {
            println!("Give a contact id or name.");
            return None;
        }

        if let Ok(id) = Id::<Contact>::parse(query) {
            match contact_queries::get_contact(&self.conn, id) {
                Ok(Some(contact)) => return Some(contact),
                Ok(None) => {
                    println!("No contact with id {}.", id);
                    return None;
                }
                Err(e) => {
                    self.print_error(&e);
                    return None;
                }
            }
        }

        let matches = contact_queries::search_by_name(&self.conn, query).unwrap_or_default();
        match matches.len() {
            0 => {
                println!("No contact matching '{}'.", query);
                None
            }
            1 => Some(matches.into_iter().next().unwrap()),
            n => {
                println!("'{}' is ambiguous ({} matches):", query, n);
                for contact in matches {
                    println!("  {}  {}", contact.id, contact.name);
                }
                None
            }
        }
    }
}
