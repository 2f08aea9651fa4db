pub mod contact_queries;
pub mod activity_queries;
