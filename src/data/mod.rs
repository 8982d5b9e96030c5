pub mod group;
pub mod record;
pub mod series;
