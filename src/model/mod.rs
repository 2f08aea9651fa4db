pub mod ids;
pub mod contact;
pub mod listing;
pub mod activity;
pub mod tag;

// Re-exports for convenience
pub use ids::Id;
pub use contact::{Contact, ContactUpdate, NewContact, CATEGORY_META_KEY, RESERVED_REQUEST_KEYS};
pub use listing::{Listing, ListingStore, NewListing};
pub use activity::{ActivityEntry, ActivityKind, ActivitySort, SortDirection};
pub use tag::Tag;
