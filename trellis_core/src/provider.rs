// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side data-count provider consumed by the strategies.

use crate::{GroupInfo, GroupRange};

/// Error from the host's data source.
///
/// This is the sole recoverable failure in a layout pass: the strategies
/// trust their host for everything else and treat inconsistent indices or
/// references as caller bugs (debug assertions). A provider error aborts the
/// in-progress operation and propagates to the host, which decides whether to
/// retry on a later pass. No partial layout result is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DataSourceError {
    /// The backing data source became unavailable mid-layout.
    #[error("collection data source is unavailable")]
    Unavailable,
    /// The provider was asked about an index it cannot resolve.
    #[error("index {index} is out of range (count {count})")]
    IndexOutOfRange {
        /// The index that could not be resolved.
        index: usize,
        /// The number of entries the source currently holds.
        count: usize,
    },
}

/// Item and group counts for the collection being laid out.
///
/// Implemented by the host's data-source adapter. All strategy estimation
/// math is driven through this trait; each query may fail (for example when
/// the backing source disappears mid-layout), in which case the calling
/// operation aborts and the error propagates.
pub trait LayoutDataProvider {
    /// Total number of items across all groups.
    fn total_item_count(&self) -> Result<usize, DataSourceError>;

    /// Total number of groups. Zero when the collection is ungrouped.
    fn total_group_count(&self) -> Result<usize, DataSourceError>;

    /// Resolves the group placement of the item at `item_index`.
    fn group_from_item(&self, item_index: usize) -> Result<GroupInfo, DataSourceError>;

    /// Resolves the item span of the group at `group_index`.
    fn group_from_index(&self, group_index: usize) -> Result<GroupRange, DataSourceError>;
}

impl<P: LayoutDataProvider + ?Sized> LayoutDataProvider for &P {
    fn total_item_count(&self) -> Result<usize, DataSourceError> {
        (**self).total_item_count()
    }

    fn total_group_count(&self) -> Result<usize, DataSourceError> {
        (**self).total_group_count()
    }

    fn group_from_item(&self, item_index: usize) -> Result<GroupInfo, DataSourceError> {
        (**self).group_from_item(item_index)
    }

    fn group_from_index(&self, group_index: usize) -> Result<GroupRange, DataSourceError> {
        (**self).group_from_index(group_index)
    }
}
