// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test fixtures.

use trellis_core::{DataSourceError, GroupInfo, GroupRange, LayoutDataProvider};

/// Flat in-memory data provider for tests; calendars are never grouped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StubData {
    item_count: usize,
}

impl StubData {
    pub(crate) fn flat(item_count: usize) -> Self {
        Self { item_count }
    }
}

impl LayoutDataProvider for StubData {
    fn total_item_count(&self) -> Result<usize, DataSourceError> {
        Ok(self.item_count)
    }

    fn total_group_count(&self) -> Result<usize, DataSourceError> {
        Ok(0)
    }

    fn group_from_item(&self, item_index: usize) -> Result<GroupInfo, DataSourceError> {
        Err(DataSourceError::IndexOutOfRange {
            index: item_index,
            count: 0,
        })
    }

    fn group_from_index(&self, group_index: usize) -> Result<GroupRange, DataSourceError> {
        Err(DataSourceError::IndexOutOfRange {
            index: group_index,
            count: 0,
        })
    }
}
