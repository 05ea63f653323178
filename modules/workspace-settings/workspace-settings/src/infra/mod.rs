pub mod feature_flags;
pub mod package_access;
pub mod storage;
