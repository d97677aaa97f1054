mod uuid;
pub use uuid::*;

mod weekday;
pub use weekday::*;

mod tag_set;
pub use tag_set::*;
