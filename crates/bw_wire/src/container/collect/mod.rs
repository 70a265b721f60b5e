//! Bidirectional maps, multimaps, multisets and tables.
//!
//! | tag              | runtime type        | category |
//! |------------------|---------------------|----------|
//! | `BiMap`          | [`BiMap`]           | Map      |
//! | `ListMultimap`   | [`ListMultimap`]    | Map      |
//! | `SetMultimap`    | [`SetMultimap`]     | Map      |
//! | `Multimap`       | abstract, built as `ListMultimap` | Map |
//! | `Multiset`       | [`Multiset`]        | Counted  |
//! | `SortedMultiset` | [`SortedMultiset`]  | Counted  |
//! | `Table`          | [`Table`]           | Table    |
//!
//! Multimaps are iterated as one `(key, value)` entry per value.

// -----------------------------------------------------------------------------
// Modules

mod bimap;
mod multimap;
mod multiset;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use bimap::BiMap;
pub use multimap::{ListMultimap, SetMultimap};
pub use multiset::{Multiset, SortedMultiset};
pub use table::Table;

// -----------------------------------------------------------------------------
// Kinds

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Value;
use crate::container::builder::{Accumulator, CheckedBuilder};
use crate::container::cursor::{Entry, EntryReader, Shape};
use crate::container::{
    ContainerError, ContainerFactory, ReadContainer, ReadOptions, WriteContainer, base,
};
use crate::info::{ContainerCategory, ContainerKind, TypeDescriptor};

pub static BIMAP: ContainerKind = ContainerKind::new(
    "BiMap",
    "bw_wire::container::collect::BiMap",
    ContainerCategory::Map,
    2,
);
pub static LIST_MULTIMAP: ContainerKind = ContainerKind::new(
    "ListMultimap",
    "bw_wire::container::collect::ListMultimap",
    ContainerCategory::Map,
    2,
);
pub static SET_MULTIMAP: ContainerKind = ContainerKind::new(
    "SetMultimap",
    "bw_wire::container::collect::SetMultimap",
    ContainerCategory::Map,
    2,
);
pub static MULTIMAP: ContainerKind = ContainerKind::with_default(
    "Multimap",
    "bw_wire::container::collect::Multimap",
    &LIST_MULTIMAP,
);
pub static MULTISET: ContainerKind = ContainerKind::new(
    "Multiset",
    "bw_wire::container::collect::Multiset",
    ContainerCategory::Counted,
    1,
);
pub static SORTED_MULTISET: ContainerKind = ContainerKind::new(
    "SortedMultiset",
    "bw_wire::container::collect::SortedMultiset",
    ContainerCategory::Counted,
    1,
);
pub static TABLE: ContainerKind = ContainerKind::new(
    "Table",
    "bw_wire::container::collect::Table",
    ContainerCategory::Table,
    3,
);

static KINDS: &[&ContainerKind] = &[
    &BIMAP,
    &LIST_MULTIMAP,
    &SET_MULTIMAP,
    &MULTIMAP,
    &MULTISET,
    &SORTED_MULTISET,
    &TABLE,
];

// -----------------------------------------------------------------------------
// Accumulators

impl Accumulator for BiMap {
    fn kind(&self) -> &'static ContainerKind {
        &BIMAP
    }

    fn accept(
        &mut self,
        key: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.insert(key.unwrap_or_default(), value).map(drop)
    }

    fn finish(self) -> Value {
        Value::container(self)
    }
}

impl Accumulator for ListMultimap {
    fn kind(&self) -> &'static ContainerKind {
        &LIST_MULTIMAP
    }

    fn accept(
        &mut self,
        key: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.insert(key.unwrap_or_default(), value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self)
    }
}

impl Accumulator for SetMultimap {
    fn kind(&self) -> &'static ContainerKind {
        &SET_MULTIMAP
    }

    fn accept(
        &mut self,
        key: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.insert(key.unwrap_or_default(), value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self)
    }
}

impl Accumulator for Multiset {
    fn kind(&self) -> &'static ContainerKind {
        &MULTISET
    }

    fn accept(
        &mut self,
        _: Option<Value>,
        _: Option<Value>,
        value: Value,
        count: u32,
    ) -> Result<(), ContainerError> {
        self.add(value, count);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self)
    }
}

impl Accumulator for SortedMultiset {
    fn kind(&self) -> &'static ContainerKind {
        &SORTED_MULTISET
    }

    fn accept(
        &mut self,
        _: Option<Value>,
        _: Option<Value>,
        value: Value,
        count: u32,
    ) -> Result<(), ContainerError> {
        self.add(value, count);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self)
    }
}

impl Accumulator for Table {
    fn kind(&self) -> &'static ContainerKind {
        &TABLE
    }

    fn accept(
        &mut self,
        row: Option<Value>,
        column: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.insert(row.unwrap_or_default(), column.unwrap_or_default(), value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self)
    }
}

fn builder_for(
    kind: &'static ContainerKind,
    declared: &TypeDescriptor,
) -> Option<Box<dyn WriteContainer>> {
    let kind = kind.default_kind();
    let builder = if kind == &BIMAP {
        CheckedBuilder::new(BiMap::new(), declared).boxed()
    } else if kind == &LIST_MULTIMAP {
        CheckedBuilder::new(ListMultimap::new(), declared).boxed()
    } else if kind == &SET_MULTIMAP {
        CheckedBuilder::new(SetMultimap::new(), declared).boxed()
    } else if kind == &MULTISET {
        CheckedBuilder::new(Multiset::new(), declared).boxed()
    } else if kind == &SORTED_MULTISET {
        CheckedBuilder::new(SortedMultiset::new(), declared).boxed()
    } else if kind == &TABLE {
        CheckedBuilder::new(Table::new(), declared).boxed()
    } else {
        return None;
    };
    Some(builder)
}

// -----------------------------------------------------------------------------
// CollectFactory

/// The factory of the `collect` family.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectFactory;

impl ContainerFactory for CollectFactory {
    fn name(&self) -> &'static str {
        "collect"
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

        if let Some(map) = container.downcast_ref::<BiMap>() {
            let mut shape = Shape::new(&BIMAP, declared).with_size(map.len());
            // An empty or single entry map reads back the same under `Map`.
            if map.len() <= 1 && declared.container_kind() == Some(&base::MAP) {
                shape = shape.with_meta_type_required(false);
            }
            let entries = map.iter().map(|(k, v)| Entry::keyed(k, v));
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(map) = container.downcast_ref::<ListMultimap>() {
            let shape = Shape::new(&LIST_MULTIMAP, declared).with_size(map.len());
            let entries = map.iter().map(|(k, v)| Entry::keyed(k, v));
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(map) = container.downcast_ref::<SetMultimap>() {
            let shape = Shape::new(&SET_MULTIMAP, declared).with_size(map.len());
            let entries = map.iter().map(|(k, v)| Entry::keyed(k, v));
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(bag) = container.downcast_ref::<Multiset>() {
            let shape = Shape::new(&MULTISET, declared).with_size(bag.len());
            let entries = bag.iter().map(|(v, &count)| Entry::counted(v, count));
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(bag) = container.downcast_ref::<SortedMultiset>() {
            let shape = Shape::new(&SORTED_MULTISET, declared).with_size(bag.len());
            let entries = bag.iter().map(|(v, &count)| Entry::counted(v, count));
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(table) = container.downcast_ref::<Table>() {
            let shape = Shape::new(&TABLE, declared)
                .with_size(table.len())
                .with_dimensions(table.row_count(), table.column_count());
            let entries = table
                .iter()
                .map(|(r, c, v)| Entry::cell(Cow::Borrowed(r), Cow::Borrowed(c), v));
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

    use bw_utils::hash::HashMap;

    use super::{
        BIMAP, BiMap, CollectFactory, ListMultimap, MULTIMAP, Multiset, SortedMultiset, Table,
    };
    use crate::Value;
    use crate::container::base::BaseFactory;
    use crate::container::factory::tests::transcode;
    use crate::container::{ContainerError, ContainerFactory, FactoryChain, ReadOptions};
    use crate::info::{TypeDescriptor, Typed};

    fn chain() -> FactoryChain {
        FactoryChain::new(vec![Box::new(CollectFactory), Box::new(BaseFactory)])
    }

    fn bimap(size: i32) -> Value {
        let mut map = BiMap::new();
        for i in 0..size {
            map.insert(Value::from(i), Value::from(-i - 1)).unwrap();
        }
        Value::container(map)
    }

    #[test]
    fn small_bimap_under_map_needs_no_tag() {
        let declared = <HashMap<i32, i32>>::type_descriptor();
        let options = ReadOptions::default();

        for (size, required) in [(0, false), (1, false), (2, true)] {
            let value = bimap(size);
            let cursor = CollectFactory.read(&value, &declared, options).unwrap();
            assert_eq!(cursor.meta_type_required(), required, "size {size}");
            assert_eq!(cursor.meta_tag(), "BiMap");
        }

        let declared =
            TypeDescriptor::new(BIMAP.ty(), [i32::type_descriptor(), i32::type_descriptor()]);
        let value = bimap(2);
        let cursor = CollectFactory.read(&value, &declared, options).unwrap();
        assert!(!cursor.meta_type_required());

        let value = bimap(1);
        let cursor = CollectFactory.read(&value, &TypeDescriptor::any(), options).unwrap();
        assert!(cursor.meta_type_required());
    }

    #[test]
    fn bimap_rejects_duplicate_values() {
        let mut builder = CollectFactory.write_for_tag("BiMap", &TypeDescriptor::any()).unwrap();
        builder.add_entry(Value::from("a"), Value::from(1_i32)).unwrap();
        let err = builder.add_entry(Value::from("b"), Value::from(1_i32)).unwrap_err();
        assert!(matches!(err, ContainerError::DuplicateValue { tag: "BiMap", .. }));
    }

    #[test]
    fn abstract_multimap_builds_list_multimap() {
        let declared = TypeDescriptor::new(
            MULTIMAP.ty(),
            [String::type_descriptor(), i32::type_descriptor()],
        );
        let mut builder = CollectFactory.write_for_type(&declared).unwrap();
        assert_eq!(builder.key_type(), String::type_descriptor());
        builder.add_entry(Value::from("a"), Value::from(1_i32)).unwrap();
        builder.add_entry(Value::from("a"), Value::from(1_i32)).unwrap();
        let value = builder.build();
        assert_eq!(value.downcast_container::<ListMultimap>().map(ListMultimap::len), Some(2));

        let cursor = CollectFactory.read(&value, &declared, ReadOptions::default()).unwrap();
        assert!(!cursor.meta_type_required());
    }

    #[test]
    fn counted_entries() {
        let mut builder = CollectFactory.write_for_tag("Multiset", &TypeDescriptor::any()).unwrap();
        builder.add_count(Value::from("x"), 2).unwrap();
        assert!(matches!(
            builder.add_count(Value::from("x"), 0),
            Err(ContainerError::InvalidCount { count: 0, .. })
        ));
        assert!(builder.add_entry(Value::from("k"), Value::from("x")).is_err());
        let value = builder.build();

        let mut cursor = CollectFactory
            .read(&value, &TypeDescriptor::any(), ReadOptions::default())
            .unwrap();
        assert_eq!(cursor.size(), Some(1));
        assert!(cursor.has_next());
        cursor.advance();
        assert_eq!(cursor.count(), 2);
        assert!(!cursor.has_next());
    }

    #[test]
    fn round_trips() {
        let chain = chain();
        let options = ReadOptions::default();

        let mut multimap = ListMultimap::new();
        multimap.insert(Value::from("k"), Value::container(vec![Value::from(1_i32)]));
        multimap.insert(Value::from("k"), Value::from(2_i32));

        let mut bag = SortedMultiset::new();
        bag.add(Value::from('a'), 3);
        let mut unsorted = Multiset::new();
        unsorted.add(Value::from(true), 2);

        let mut table = Table::new();
        table.insert(Value::from(1_i32), Value::from("a"), Value::container(bag.clone()));
        table.insert(Value::from(2_i32), Value::from("b"), Value::Null);

        for value in [
            bimap(3),
            Value::container(multimap),
            Value::container(bag),
            Value::container(unsorted),
            Value::container(table),
        ] {
            assert_eq!(transcode(&chain, &value, &TypeDescriptor::any(), options), value);
        }
    }

    #[test]
    fn table_dimensions() {
        let mut table = Table::new();
        table.insert(Value::from(1_i32), Value::from("a"), Value::from(0_i32));
        table.insert(Value::from(1_i32), Value::from("b"), Value::from(0_i32));
        let value = Value::container(table);

        let cursor = CollectFactory
            .read(&value, &TypeDescriptor::any(), ReadOptions::default())
            .unwrap();
        assert_eq!(cursor.dimension_size(0), Some(1));
        assert_eq!(cursor.dimension_size(1), Some(2));
        assert_eq!(cursor.dimension_size(2), None);
    }
}
