//! Method locator - resolves target descriptors against a live host

use std::marker::PhantomData;

use crate::core::error::{InterceptError, Result};
use crate::host::descriptor::TargetDescriptor;
use crate::host::operations::HostOperation;
use crate::host::runtime::{Host, OperationHandle};

/// A located host operation, typed by the operation it was resolved for
#[derive(Debug)]
pub struct CallHandle<Op> {
    handle: OperationHandle,
    _op: PhantomData<fn() -> Op>,
}

impl<Op> CallHandle<Op> {
    pub fn handle(&self) -> OperationHandle {
        self.handle
    }
}

impl<Op> Clone for CallHandle<Op> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Op> Copy for CallHandle<Op> {}

/// Find the single host operation matching `descriptor` exactly
///
/// Zero matches is `TargetNotFound`, more than one is `AmbiguousTarget`.
pub fn locate(host: &dyn Host, descriptor: &TargetDescriptor) -> Result<OperationHandle> {
    let mut matches = host
        .operations()
        .into_iter()
        .filter(|(_, candidate)| candidate == descriptor)
        .map(|(handle, _)| handle);

    let first = matches
        .next()
        .ok_or_else(|| InterceptError::TargetNotFound(descriptor.clone()))?;

    let extra = matches.count();
    if extra > 0 {
        return Err(InterceptError::AmbiguousTarget {
            descriptor: descriptor.clone(),
            matches: extra + 1,
        });
    }

    Ok(first)
}

/// Locate the operation described by `Op`
pub fn locate_operation<Op: HostOperation>(host: &dyn Host) -> Result<CallHandle<Op>> {
    let handle = locate(host, &Op::descriptor())?;
    Ok(CallHandle {
        handle,
        _op: PhantomData,
    })
}
