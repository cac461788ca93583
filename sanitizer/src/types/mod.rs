mod output;
mod raw;

pub use output::OutputRecord;
pub use raw::{EMAIL_KEY, FIRST_NAME_KEY, LAST_NAME_KEY, MORE_DATA_KEY, PHONE_KEY, RawRecord};
