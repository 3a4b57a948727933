// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test fixtures.

use trellis_core::{DataSourceError, GroupInfo, GroupRange, LayoutDataProvider};

/// In-memory data provider for tests: a list of per-group item counts, or a
/// flat item count.
#[derive(Debug, Clone)]
pub(crate) struct StubData {
    groups: Vec<usize>,
    grouped: bool,
}

impl StubData {
    pub(crate) fn flat(item_count: usize) -> Self {
        Self {
            groups: vec![item_count],
            grouped: false,
        }
    }

    pub(crate) fn grouped(group_sizes: &[usize]) -> Self {
        Self {
            groups: group_sizes.to_vec(),
            grouped: true,
        }
    }
}

impl LayoutDataProvider for StubData {
    fn total_item_count(&self) -> Result<usize, DataSourceError> {
        Ok(self.groups.iter().sum())
    }

    fn total_group_count(&self) -> Result<usize, DataSourceError> {
        Ok(if self.grouped { self.groups.len() } else { 0 })
    }

    fn group_from_item(&self, item_index: usize) -> Result<GroupInfo, DataSourceError> {
        let mut first = 0;
        for (group_index, &count) in self.groups.iter().enumerate() {
            if item_index < first + count {
                return Ok(GroupInfo {
                    group_index,
                    index_in_group: item_index - first,
                    item_count: count,
                });
            }
            first += count;
        }
        Err(DataSourceError::IndexOutOfRange {
            index: item_index,
            count: first,
        })
    }

    fn group_from_index(&self, group_index: usize) -> Result<GroupRange, DataSourceError> {
        if group_index >= self.groups.len() {
            return Err(DataSourceError::IndexOutOfRange {
                index: group_index,
                count: self.groups.len(),
            });
        }
        let first_item = self.groups[..group_index].iter().sum();
        Ok(GroupRange {
            first_item,
            item_count: self.groups[group_index],
        })
    }
}

/// A provider whose backing source has gone away; every query fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnavailableData;

impl LayoutDataProvider for UnavailableData {
    fn total_item_count(&self) -> Result<usize, DataSourceError> {
        Err(DataSourceError::Unavailable)
    }

    fn total_group_count(&self) -> Result<usize, DataSourceError> {
        Err(DataSourceError::Unavailable)
    }

    fn group_from_item(&self, _item_index: usize) -> Result<GroupInfo, DataSourceError> {
        Err(DataSourceError::Unavailable)
    }

    fn group_from_index(&self, _group_index: usize) -> Result<GroupRange, DataSourceError> {
        Err(DataSourceError::Unavailable)
    }
}
