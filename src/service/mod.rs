//! CountryService: thin use-case layer over the country store.

mod country;
pub use country::CountryService;
