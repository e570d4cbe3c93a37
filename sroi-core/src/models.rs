mod fraction;
pub use fraction::*;

mod outcome;
pub use outcome::*;

mod parameters;
pub use parameters::*;

mod valuation;
pub use valuation::*;
