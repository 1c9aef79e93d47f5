pub mod consensus;
pub mod correction;
pub mod date;
pub mod legacy;
pub mod mrz;

pub use consensus::ScanConsensus;
pub use date::{DateNormalizer, DateOrder, INVALID_DATE};
pub use mrz::MrzDecoder;
