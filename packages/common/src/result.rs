use crate::error::CommonError;

/// Result alias for the common package
pub type CommonResult<T> = Result<T, CommonError>;
