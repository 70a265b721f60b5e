//! Dense and sparse two dimensional grids.
//!
//! | tag          | runtime type       |
//! |--------------|--------------------|
//! | `DenseGrid`  | [`DenseGrid`]      |
//! | `SparseGrid` | [`SparseGrid`]     |
//! | `Grid`       | abstract, built as `DenseGrid` |
//!
//! Grid entries carry the row index as key and the column index as column,
//! both as `i32` values. Only non-empty cells are iterated; the grid size
//! is reported through `dimension_size` and must be supplied to the builder
//! through `dimensions` before any cell of a dense grid is added.

// -----------------------------------------------------------------------------
// Modules

mod dense;
mod sparse;

// -----------------------------------------------------------------------------
// Exports

pub use dense::DenseGrid;
pub use sparse::SparseGrid;

// -----------------------------------------------------------------------------
// Kinds

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Value;
use crate::container::builder::{Accumulator, CheckedBuilder};
use crate::container::cursor::{Entry, EntryReader, Shape};
use crate::container::{
    ContainerError, ContainerFactory, ReadContainer, ReadOptions, WriteContainer,
};
use crate::info::{ContainerCategory, ContainerKind, TypeDescriptor};

pub static DENSE_GRID: ContainerKind = ContainerKind::new(
    "DenseGrid",
    "bw_wire::container::grid::DenseGrid",
    ContainerCategory::Grid,
    1,
);
pub static SPARSE_GRID: ContainerKind = ContainerKind::new(
    "SparseGrid",
    "bw_wire::container::grid::SparseGrid",
    ContainerCategory::Grid,
    1,
);
pub static GRID: ContainerKind =
    ContainerKind::with_default("Grid", "bw_wire::container::grid::Grid", &DENSE_GRID);

static KINDS: &[&ContainerKind] = &[&DENSE_GRID, &SPARSE_GRID, &GRID];

fn index_value(index: usize) -> Value {
    i32::try_from(index).map_or(Value::I64(index as i64), Value::I32)
}

fn index_of(tag: &'static str, value: Option<Value>) -> Result<usize, ContainerError> {
    let value = value.unwrap_or_default();
    value.as_index().ok_or_else(|| ContainerError::InvalidIndex {
        tag,
        value: value.to_string(),
    })
}

fn grid_dimensions(
    tag: &'static str,
    dimensions: &[usize],
) -> Result<(usize, usize), ContainerError> {
    match *dimensions {
        [rows, columns] => Ok((rows, columns)),
        _ => Err(ContainerError::InvalidDimensions {
            tag,
            found: dimensions.len(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Accumulators

struct DenseAcc(DenseGrid);

impl Accumulator for DenseAcc {
    fn kind(&self) -> &'static ContainerKind {
        &DENSE_GRID
    }

    fn dimensions(&mut self, dimensions: &[usize]) -> Result<(), ContainerError> {
        let (rows, columns) = grid_dimensions(DENSE_GRID.tag(), dimensions)?;
        self.0 = DenseGrid::new(rows, columns)?;
        Ok(())
    }

    fn accept(
        &mut self,
        row: Option<Value>,
        column: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        let tag = DENSE_GRID.tag();
        let row = index_of(tag, row)?;
        let column = index_of(tag, column)?;
        self.0.set(row, column, value).map(drop)
    }

    fn finish(self) -> Value {
        Value::container(self.0)
    }
}

struct SparseAcc {
    grid: SparseGrid,
    bounded: bool,
}

impl Accumulator for SparseAcc {
    fn kind(&self) -> &'static ContainerKind {
        &SPARSE_GRID
    }

    fn dimensions(&mut self, dimensions: &[usize]) -> Result<(), ContainerError> {
        let (rows, columns) = grid_dimensions(SPARSE_GRID.tag(), dimensions)?;
        self.grid = SparseGrid::new(rows, columns);
        self.bounded = true;
        Ok(())
    }

    fn accept(
        &mut self,
        row: Option<Value>,
        column: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        let tag = SPARSE_GRID.tag();
        let row = index_of(tag, row)?;
        let column = index_of(tag, column)?;
        if !self.bounded {
            self.grid.grow_to_fit(row, column);
        }
        self.grid.set(row, column, value).map(drop)
    }

    fn finish(self) -> Value {
        Value::container(self.grid)
    }
}

fn builder_for(
    kind: &'static ContainerKind,
    declared: &TypeDescriptor,
) -> Option<Box<dyn WriteContainer>> {
    let kind = kind.default_kind();
    let builder = if kind == &DENSE_GRID {
        CheckedBuilder::new(DenseAcc(DenseGrid::default()), declared).boxed()
    } else if kind == &SPARSE_GRID {
        let acc = SparseAcc {
            grid: SparseGrid::default(),
            bounded: false,
        };
        CheckedBuilder::new(acc, declared).boxed()
    } else {
        return None;
    };
    Some(builder)
}

// -----------------------------------------------------------------------------
// GridFactory

/// The factory of the `grid` family.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridFactory;

impl ContainerFactory for GridFactory {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn kinds(&self) -> Vec<&'static ContainerKind> {
        KINDS.to_vec()
    }

    fn read<'a>(
        &self,
        value: &'a Value,
        declared: &TypeDescriptor,
        _options: ReadOptions,
    ) -> Option<Box<dyn ReadContainer + 'a>> {
        let container = value.as_container()?;

        if let Some(grid) = container.downcast_ref::<DenseGrid>() {
            let shape = Shape::new(&DENSE_GRID, declared)
                .with_size(grid.len())
                .with_dimensions(grid.rows(), grid.columns());
            let entries = grid.iter().map(|(row, column, value)| {
                Entry::cell(
                    Cow::Owned(index_value(row)),
                    Cow::Owned(index_value(column)),
                    value,
                )
            });
            return Some(Box::new(EntryReader::new(shape, entries).with_cells(grid)));
        }
        if let Some(grid) = container.downcast_ref::<SparseGrid>() {
            let shape = Shape::new(&SPARSE_GRID, declared)
                .with_size(grid.len())
                .with_dimensions(grid.rows(), grid.columns());
            let entries = grid.iter().map(|(row, column, value)| {
                Entry::cell(
                    Cow::Owned(index_value(row)),
                    Cow::Owned(index_value(column)),
                    value,
                )
            });
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        None
    }

    fn write_for_type(&self, declared: &TypeDescriptor) -> Option<Box<dyn WriteContainer>> {
        builder_for(declared.container_kind()?, declared)
    }

    fn write_for_tag(
        &self,
        tag: &str,
        declared: &TypeDescriptor,
    ) -> Option<Box<dyn WriteContainer>> {
        let kind = KINDS.iter().find(|kind| kind.tag() == tag)?;
        builder_for(kind, declared)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    use super::{DenseGrid, GRID, GridFactory, SparseGrid};
    use crate::Value;
    use crate::container::base::BaseFactory;
    use crate::container::factory::tests::transcode;
    use crate::container::{ContainerError, ContainerFactory, FactoryChain, ReadOptions};
    use crate::info::{TypeDescriptor, Typed};

    #[test]
    fn dense_cursor() {
        let mut grid = DenseGrid::new(2, 2).unwrap();
        grid.set(0, 1, Value::from("a")).unwrap();
        grid.set(1, 0, Value::from("b")).unwrap();
        let value = Value::container(grid);

        let declared = TypeDescriptor::new(GRID.ty(), [String::type_descriptor()]);
        let mut cursor = GridFactory.read(&value, &declared, ReadOptions::default()).unwrap();
        assert!(!cursor.meta_type_required());
        assert_eq!(cursor.value_type(), String::type_descriptor());
        assert_eq!(cursor.key_type(), i32::type_descriptor());
        assert_eq!(cursor.size(), Some(2));
        assert_eq!(cursor.dimension_size(0), Some(2));
        assert_eq!(cursor.value_at(1, 0), Some(&Value::from("b")));
        assert_eq!(cursor.value_at(0, 0), None);

        cursor.advance();
        assert_eq!(cursor.key(), Some(&Value::from(0_i32)));
        assert_eq!(cursor.column(), Some(&Value::from(1_i32)));
        assert_eq!(cursor.value(), Some(&Value::from("a")));
    }

    #[test]
    fn dense_bounds() {
        let mut builder = GridFactory.write_for_tag("DenseGrid", &TypeDescriptor::any()).unwrap();
        builder.dimensions(&[1, 1]).unwrap();
        builder.add_cell(Value::from(0_i32), Value::from(0_i32), Value::from("x")).unwrap();
        assert!(matches!(
            builder.add_cell(Value::from(0_i32), Value::from(1_i32), Value::from("y")),
            Err(ContainerError::OutOfBounds { .. })
        ));
        assert!(matches!(
            builder.add_cell(Value::from(-1_i32), Value::from(0_i32), Value::from("y")),
            Err(ContainerError::InvalidIndex { .. })
        ));
        assert!(matches!(
            builder.add_value(Value::from("z")),
            Err(ContainerError::MissingKey { .. })
        ));
        assert!(builder.dimensions(&[1]).is_err());
    }

    #[test]
    fn dense_dimensions_too_large() {
        let mut builder = GridFactory
            .write_for_tag("DenseGrid", &TypeDescriptor::any())
            .unwrap();
        assert!(matches!(
            builder.dimensions(&[1 << 40, 1 << 40]),
            Err(ContainerError::TooLarge { .. })
        ));
        assert!(matches!(
            builder.dimensions(&[usize::MAX, 2]),
            Err(ContainerError::TooLarge { .. })
        ));
        assert!(DenseGrid::new(usize::MAX / 2, 1).is_err());

        builder.dimensions(&[1, 2]).unwrap();
        builder
            .add_cell(Value::from(0_i32), Value::from(1_i32), Value::from("x"))
            .unwrap();
        let value = builder.build();
        let grid = value.downcast_container::<DenseGrid>().unwrap();
        assert_eq!(grid.get(0, 1), Some(&Value::from("x")));
    }

    #[test]
    fn sparse_grows_without_dimensions() {
        let mut builder = GridFactory.write_for_tag("SparseGrid", &TypeDescriptor::any()).unwrap();
        builder.add_cell(Value::from(4_i32), Value::from(7_i32), Value::from(1_i32)).unwrap();
        let value = builder.build();
        let grid = value.downcast_container::<SparseGrid>().unwrap();
        assert_eq!((grid.rows(), grid.columns()), (5, 8));
    }

    #[test]
    fn round_trips() {
        let chain = FactoryChain::new(vec![Box::new(GridFactory), Box::new(BaseFactory)]);

        let mut dense = DenseGrid::new(2, 3).unwrap();
        dense.set(1, 2, Value::container(vec![Value::from(1_i32)])).unwrap();
        let mut sparse = SparseGrid::new(10, 10);
        sparse.set(9, 9, Value::from(0.5_f64)).unwrap();

        for value in [Value::container(dense), Value::container(sparse)] {
            let copy = transcode(&chain, &value, &TypeDescriptor::any(), ReadOptions::default());
            assert_eq!(copy, value);
        }
    }
}
