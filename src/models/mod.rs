pub mod record;
pub mod season;

pub use record::Record;
pub use season::Season;
