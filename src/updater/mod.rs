mod run;

pub use run::{run, update_all, UpdateSummary};
