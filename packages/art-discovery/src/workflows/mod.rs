//! Side workflows that run over discovery output.

pub mod contacts;
pub mod submissions;

pub use contacts::{export_contacts, load_artists, ArtistContact, ContactFinder};
pub use submissions::{import_submissions, parse_submissions, CatalogArtwork, CatalogLocation};
