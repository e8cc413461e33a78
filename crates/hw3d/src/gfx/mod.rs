//! Direct3D 11 rendering.

pub mod buffers;
pub mod cube_mesh;
pub mod device_resources;
pub mod renderer;
pub mod shader;

use crate::error::MyResult;
use eyre::eyre;

/// Unwraps the out-parameter of a successful `Create*` call.
pub(crate) fn created<T>(resource: Option<T>, what: &str) -> MyResult<T> {
    resource.ok_or_else(|| eyre!("{what} was not created").into())
}
