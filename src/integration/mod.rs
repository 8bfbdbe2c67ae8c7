pub mod uri_scheme;

pub use uri_scheme::UriScheme;
