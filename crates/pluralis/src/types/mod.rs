mod category;
mod expression_hash;
mod operands;
mod rule_info;

pub use category::{OperandId, PluralCategory};
pub use expression_hash::{ExpressionHash, StructuralHash};
pub use operands::{NumberError, PluralOperands};
pub use rule_info::{RuleInfo, RuleType, normalize_culture};
