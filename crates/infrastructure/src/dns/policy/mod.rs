pub mod policy_set;
pub mod shared;

pub use policy_set::PolicySet;
pub use shared::SharedPolicySet;
