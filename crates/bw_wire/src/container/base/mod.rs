//! The base container family, always available.
//!
//! | tag         | runtime type                     | category |
//! |-------------|----------------------------------|----------|
//! | `List`      | `Vec<Value>`                     | List     |
//! | `Set`       | `bw_utils::hash::HashSet<Value>` | Set      |
//! | `SortedSet` | `BTreeSet<Value>`                | Set      |
//! | `Map`       | `bw_utils::hash::HashMap<Value, Value>` | Map |
//! | `SortedMap` | `BTreeMap<Value, Value>`         | Map      |
//! | `Array`     | [`ValueArray`]                   | List     |
//! | `i32[]` ... | [`PrimitiveArray`]               | List     |

// -----------------------------------------------------------------------------
// Modules

mod array;

// -----------------------------------------------------------------------------
// Exports

pub use array::{
    BOOL_ARRAY, CHAR_ARRAY, F32_ARRAY, F64_ARRAY, I8_ARRAY, I16_ARRAY, I32_ARRAY, I64_ARRAY,
    PRIMITIVE_KINDS, PrimitiveArray, U8_ARRAY, U16_ARRAY, U32_ARRAY, U64_ARRAY, ValueArray,
};

// -----------------------------------------------------------------------------
// Kinds

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use bw_utils::hash::{HashMap, HashSet};

use crate::Value;
use crate::container::builder::{Accumulator, CheckedBuilder};
use crate::container::cursor::{Entry, EntryReader, Shape};
use crate::container::{
    ContainerError, ContainerFactory, ReadContainer, ReadOptions, WriteContainer,
};
use crate::info::{ContainerCategory, ContainerKind, TypeDescriptor, Typed};
use crate::value::impl_container;

pub static LIST: ContainerKind =
    ContainerKind::new("List", "alloc::vec::Vec", ContainerCategory::List, 1);
pub static SET: ContainerKind =
    ContainerKind::new("Set", "bw_utils::hash::HashSet", ContainerCategory::Set, 1);
pub static SORTED_SET: ContainerKind = ContainerKind::new(
    "SortedSet",
    "alloc::collections::BTreeSet",
    ContainerCategory::Set,
    1,
);
pub static MAP: ContainerKind =
    ContainerKind::new("Map", "bw_utils::hash::HashMap", ContainerCategory::Map, 2);
pub static SORTED_MAP: ContainerKind = ContainerKind::new(
    "SortedMap",
    "alloc::collections::BTreeMap",
    ContainerCategory::Map,
    2,
);
pub static ARRAY: ContainerKind = ContainerKind::new(
    "Array",
    "bw_wire::container::base::ValueArray",
    ContainerCategory::List,
    1,
);

static KINDS: &[&ContainerKind] = &[&LIST, &SET, &SORTED_SET, &MAP, &SORTED_MAP, &ARRAY];

impl_container!(ordered Vec<Value> => &LIST);
impl_container!(unordered HashSet<Value> => &SET);
impl_container!(ordered BTreeSet<Value> => &SORTED_SET);
impl_container!(unordered HashMap<Value, Value> => &MAP);
impl_container!(ordered BTreeMap<Value, Value> => &SORTED_MAP);

// -----------------------------------------------------------------------------
// Typed

impl<T: Typed> Typed for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(LIST.ty(), [T::type_descriptor()])
    }
}

impl<T: Typed, S> Typed for HashSet<T, S> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(SET.ty(), [T::type_descriptor()])
    }
}

impl<T: Typed> Typed for BTreeSet<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(SORTED_SET.ty(), [T::type_descriptor()])
    }
}

impl<K: Typed, V: Typed, S> Typed for HashMap<K, V, S> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(MAP.ty(), [K::type_descriptor(), V::type_descriptor()])
    }
}

impl<K: Typed, V: Typed> Typed for BTreeMap<K, V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(SORTED_MAP.ty(), [K::type_descriptor(), V::type_descriptor()])
    }
}

// -----------------------------------------------------------------------------
// Accumulators

struct ListAcc(Vec<Value>);

impl Accumulator for ListAcc {
    fn kind(&self) -> &'static ContainerKind {
        &LIST
    }

    fn accept(
        &mut self,
        _: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.0.push(value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self.0)
    }
}

struct SetAcc(HashSet<Value>);

impl Accumulator for SetAcc {
    fn kind(&self) -> &'static ContainerKind {
        &SET
    }

    fn accept(
        &mut self,
        _: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.0.insert(value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self.0)
    }
}

struct SortedSetAcc(BTreeSet<Value>);

impl Accumulator for SortedSetAcc {
    fn kind(&self) -> &'static ContainerKind {
        &SORTED_SET
    }

    fn accept(
        &mut self,
        _: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.0.insert(value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self.0)
    }
}

struct MapAcc(HashMap<Value, Value>);

impl Accumulator for MapAcc {
    fn kind(&self) -> &'static ContainerKind {
        &MAP
    }

    fn accept(
        &mut self,
        key: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.0.insert(key.unwrap_or_default(), value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self.0)
    }
}

struct SortedMapAcc(BTreeMap<Value, Value>);

impl Accumulator for SortedMapAcc {
    fn kind(&self) -> &'static ContainerKind {
        &SORTED_MAP
    }

    fn accept(
        &mut self,
        key: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.0.insert(key.unwrap_or_default(), value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(self.0)
    }
}

struct ArrayAcc {
    element: TypeDescriptor,
    values: Vec<Value>,
}

impl Accumulator for ArrayAcc {
    fn kind(&self) -> &'static ContainerKind {
        &ARRAY
    }

    fn accept(
        &mut self,
        _: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.values.push(value);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::container(ValueArray::new(self.element, self.values))
    }
}

struct PrimitiveAcc(PrimitiveArray);

impl Accumulator for PrimitiveAcc {
    fn kind(&self) -> &'static ContainerKind {
        self.0.kind()
    }

    fn accept(
        &mut self,
        _: Option<Value>,
        _: Option<Value>,
        value: Value,
        _: u32,
    ) -> Result<(), ContainerError> {
        self.0.push(value)
    }

    fn finish(self) -> Value {
        Value::container(self.0)
    }
}

fn builder_for(
    kind: &'static ContainerKind,
    declared: &TypeDescriptor,
) -> Option<Box<dyn WriteContainer>> {
    let builder = if kind == &LIST {
        CheckedBuilder::new(ListAcc(Vec::new()), declared).boxed()
    } else if kind == &SET {
        CheckedBuilder::new(SetAcc(HashSet::default()), declared).boxed()
    } else if kind == &SORTED_SET {
        CheckedBuilder::new(SortedSetAcc(BTreeSet::new()), declared).boxed()
    } else if kind == &MAP {
        CheckedBuilder::new(MapAcc(HashMap::default()), declared).boxed()
    } else if kind == &SORTED_MAP {
        CheckedBuilder::new(SortedMapAcc(BTreeMap::new()), declared).boxed()
    } else if kind == &ARRAY {
        let element = declared.args_for_arity(1).remove(0);
        let acc = ArrayAcc {
            element,
            values: Vec::new(),
        };
        CheckedBuilder::new(acc, declared).boxed()
    } else {
        let array = PrimitiveArray::empty(kind)?;
        let element = array.element_type();
        CheckedBuilder::new(PrimitiveAcc(array), declared)
            .with_value_type(element)
            .boxed()
    };
    Some(builder)
}

fn kind_for_tag(tag: &str) -> Option<&'static ContainerKind> {
    KINDS
        .iter()
        .chain(PRIMITIVE_KINDS)
        .find(|kind| kind.tag() == tag)
        .copied()
}

// -----------------------------------------------------------------------------
// BaseFactory

/// The factory of the base family, always the last of a chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseFactory;

impl ContainerFactory for BaseFactory {
    fn name(&self) -> &'static str {
        "base"
    }

    fn kinds(&self) -> Vec<&'static ContainerKind> {
        KINDS.iter().chain(PRIMITIVE_KINDS).copied().collect()
    }

    fn read<'a>(
        &self,
        value: &'a Value,
        declared: &TypeDescriptor,
        options: ReadOptions,
    ) -> Option<Box<dyn ReadContainer + 'a>> {
        let container = value.as_container()?;

        if let Some(list) = container.downcast_ref::<Vec<Value>>() {
            let shape = Shape::new(&LIST, declared).with_size(list.len());
            return Some(Box::new(EntryReader::new(shape, list.iter().map(Entry::value))));
        }
        if let Some(set) = container.downcast_ref::<HashSet<Value>>() {
            let shape = Shape::new(&SET, declared).with_size(set.len());
            return Some(Box::new(EntryReader::new(shape, set.iter().map(Entry::value))));
        }
        if let Some(set) = container.downcast_ref::<BTreeSet<Value>>() {
            let shape = Shape::new(&SORTED_SET, declared).with_size(set.len());
            return Some(Box::new(EntryReader::new(shape, set.iter().map(Entry::value))));
        }
        if let Some(map) = container.downcast_ref::<HashMap<Value, Value>>() {
            let shape = Shape::new(&MAP, declared).with_size(map.len());
            let entries = map.iter().map(|(k, v)| Entry::keyed(k, v));
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(map) = container.downcast_ref::<BTreeMap<Value, Value>>() {
            let shape = Shape::new(&SORTED_MAP, declared).with_size(map.len());
            let entries = map.iter().map(|(k, v)| Entry::keyed(k, v));
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(array) = container.downcast_ref::<ValueArray>() {
            let element = array.element_type().clone();
            let mut shape = Shape::new(&ARRAY, declared)
                .with_size(array.len())
                .with_meta_type(TypeDescriptor::new(ARRAY.ty(), [element.clone()]));
            if shape.value_type_ref().is_any() {
                shape = shape.with_value_type(element);
            }
            let entries = array.values().iter().map(Entry::value);
            return Some(Box::new(EntryReader::new(shape, entries)));
        }
        if let Some(array) = container.downcast_ref::<PrimitiveArray>() {
            if !options.box_primitive_arrays {
                return None;
            }
            let shape = Shape::new(array.kind(), declared)
                .with_size(array.len())
                .with_value_type(array.element_type());
            return Some(Box::new(EntryReader::new(shape, array.iter().map(Entry::owned))));
        }
        None
    }

    fn write_for_type(&self, declared: &TypeDescriptor) -> Option<Box<dyn WriteContainer>> {
        let kind = declared.container_kind()?.default_kind();
        builder_for(kind, declared)
    }

    fn write_for_tag(
        &self,
        tag: &str,
        declared: &TypeDescriptor,
    ) -> Option<Box<dyn WriteContainer>> {
        builder_for(kind_for_tag(tag)?, declared)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use bw_utils::hash::{HashMap, HashSet};

    use super::{ARRAY, BaseFactory, I32_ARRAY, LIST, MAP, PrimitiveArray, SET, ValueArray};
    use crate::Value;
    use crate::container::factory::tests::transcode;
    use crate::container::{ContainerFactory, FactoryChain, ReadOptions};
    use crate::info::{TypeDescriptor, Typed};

    fn base_chain() -> FactoryChain {
        FactoryChain::new(vec![Box::new(BaseFactory)])
    }

    fn ints(values: &[i32]) -> Vec<Value> {
        values.iter().map(|&v| Value::from(v)).collect()
    }

    #[test]
    fn round_trip_typed() {
        let chain = base_chain();
        let options = ReadOptions::default();

        let list = Value::container(ints(&[3, 1, 2]));
        let declared = <Vec<i32>>::type_descriptor();
        assert_eq!(transcode(&chain, &list, &declared, options), list);

        let set = Value::container(ints(&[3, 1, 2]).into_iter().collect::<HashSet<_>>());
        let declared = <HashSet<i32>>::type_descriptor();
        assert_eq!(transcode(&chain, &set, &declared, options), set);

        let map: BTreeMap<Value, Value> =
            [(Value::from("a"), Value::from(1_i32))].into_iter().collect();
        let map = Value::container(map);
        let declared = <BTreeMap<String, i32>>::type_descriptor();
        assert_eq!(transcode(&chain, &map, &declared, options), map);
    }

    #[test]
    fn round_trip_untyped_nested() {
        let chain = base_chain();
        let inner: BTreeSet<Value> = ints(&[1, 2]).into_iter().collect();
        let mut outer: HashMap<Value, Value> = HashMap::default();
        outer.insert(Value::from("k"), Value::container(inner));
        outer.insert(Value::from("l"), Value::container(ints(&[5])));
        let outer = Value::container(outer);

        let copy = transcode(&chain, &outer, &TypeDescriptor::any(), ReadOptions::default());
        assert_eq!(copy, outer);
    }

    #[test]
    fn round_trip_arrays() {
        let chain = base_chain();
        let boxed = ReadOptions {
            box_primitive_arrays: true,
        };

        let array = ValueArray::new(String::type_descriptor(), vec![Value::from("x")]);
        let array = Value::container(array);
        assert_eq!(transcode(&chain, &array, &TypeDescriptor::any(), boxed), array);

        let primitive = Value::container(PrimitiveArray::from(vec![1_i32, 2, 3]));
        let declared = TypeDescriptor::of(I32_ARRAY.ty());
        assert_eq!(transcode(&chain, &primitive, &declared, boxed), primitive);

        // Unboxed primitive arrays are left to the format as binary blobs.
        assert!(chain.read(&primitive, &declared, ReadOptions::default()).is_none());
    }

    #[test]
    fn array_element_type_survives_meta_type() {
        let chain = base_chain();
        let options = ReadOptions::default();
        let array = ValueArray::new(i32::type_descriptor(), ints(&[4, 5]));
        let array = Value::container(array);

        let cursor = BaseFactory.read(&array, &TypeDescriptor::any(), options).unwrap();
        assert_eq!(cursor.meta_tag(), "Array");
        assert_eq!(
            cursor.meta_type(),
            TypeDescriptor::new(ARRAY.ty(), [i32::type_descriptor()])
        );

        // Declared as a list, still rebuilt as an array of `i32`.
        let declared = <Vec<i32>>::type_descriptor();
        let copy = transcode(&chain, &array, &declared, options);
        let copy = copy.downcast_container::<ValueArray>().unwrap();
        assert_eq!(copy.element_type(), &i32::type_descriptor());
        assert_eq!(copy.values(), ints(&[4, 5]).as_slice());

        // Nested under an untyped list.
        let outer = Value::container(vec![array.clone(), Value::container(ints(&[6]))]);
        assert_eq!(transcode(&chain, &outer, &TypeDescriptor::any(), options), outer);

        let list = Value::container(ints(&[1]));
        let cursor = BaseFactory.read(&list, &TypeDescriptor::any(), options).unwrap();
        assert_eq!(cursor.meta_type(), TypeDescriptor::of(LIST.ty()));
    }

    #[test]
    fn meta_type_required_by_declaration() {
        let list = Value::container(ints(&[1]));
        let options = ReadOptions::default();

        let declared = <Vec<i32>>::type_descriptor();
        let cursor = BaseFactory.read(&list, &declared, options).unwrap();
        assert!(!cursor.meta_type_required());

        let cursor = BaseFactory.read(&list, &TypeDescriptor::of(SET.ty()), options).unwrap();
        assert!(cursor.meta_type_required());
        assert_eq!(cursor.meta_tag(), "List");

        let cursor = BaseFactory.read(&list, &TypeDescriptor::any(), options).unwrap();
        assert!(cursor.meta_type_required());
    }

    #[test]
    fn declared_arguments_need_matching_arity() {
        let declared = <HashMap<String, i32>>::type_descriptor();

        let map = BaseFactory.write_for_tag("Map", &declared).unwrap();
        assert_eq!(map.key_type(), String::type_descriptor());
        assert_eq!(map.value_type(), i32::type_descriptor());

        let list = BaseFactory.write_for_tag("List", &declared).unwrap();
        assert!(list.value_type().is_any());
        assert_eq!(list.kind(), &LIST);
    }

    #[test]
    fn write_for_type_uses_declared_kind() {
        let mut builder = BaseFactory
            .write_for_type(&<HashMap<String, String>>::type_descriptor())
            .unwrap();
        assert_eq!(builder.kind(), &MAP);
        builder.add_entry(Value::from("a"), Value::from("b")).unwrap();
        builder.add_entry(Value::from("a"), Value::from("c")).unwrap();
        let map = builder.build();
        let map = map.downcast_container::<HashMap<Value, Value>>().unwrap();
        assert_eq!(map.get(&Value::from("a")), Some(&Value::from("c")));

        assert!(BaseFactory.write_for_type(&String::type_descriptor()).is_none());
    }
}
