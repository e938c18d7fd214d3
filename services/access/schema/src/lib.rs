//! sea-orm entities for the access service database.

pub mod access_codes;
