pub mod normalize;
pub mod ordering;
pub mod template;
pub mod window;

pub use normalize::{normalize, parse_with_template, NormalizedDate};
pub use ordering::{check_ordering, ordering_valid, DateOrdering, Incomparable};
pub use template::{DateTemplate, MonthStyle, Separator, YearWidth, TEMPLATES};
pub use window::{days_until, ExpiryStatus, ExpiryWindow, WindowError};
