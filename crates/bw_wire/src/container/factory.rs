use alloc::boxed::Box;
use alloc::vec::Vec;
use std::sync::LazyLock;

use log::debug;

use crate::Value;
use crate::container::{ReadContainer, ReadOptions, WriteContainer};
use crate::info::{ContainerKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// ContainerFactory

/// Creates read cursors and write builders for one family of container kinds.
///
/// Every method returns `None` when the factory does not handle the
/// value, type or tag, so the [`FactoryChain`] can ask the next factory.
pub trait ContainerFactory: Send + Sync + 'static {
    /// A short name used in log messages.
    fn name(&self) -> &'static str;

    /// Every container kind this factory can build, abstract kinds included.
    fn kinds(&self) -> Vec<&'static ContainerKind>;

    /// Creates a cursor over a runtime container value.
    ///
    /// `declared` is the type at the write site, it decides
    /// [`meta_type_required`](ReadContainer::meta_type_required).
    fn read<'a>(
        &self,
        value: &'a Value,
        declared: &TypeDescriptor,
        options: ReadOptions,
    ) -> Option<Box<dyn ReadContainer + 'a>>;

    /// Creates a builder from the declared type alone.
    fn write_for_type(&self, declared: &TypeDescriptor) -> Option<Box<dyn WriteContainer>>;

    /// Creates a builder from a wire tag.
    ///
    /// Declared arguments are used only if their number matches the
    /// tagged kind.
    fn write_for_tag(&self, tag: &str, declared: &TypeDescriptor)
    -> Option<Box<dyn WriteContainer>>;
}

// -----------------------------------------------------------------------------
// FactoryChain

/// An ordered list of factories, consulted first to last.
///
/// # Examples
///
/// ```
/// use bw_wire::container::{FactoryChain, base::BaseFactory};
///
/// let chain = FactoryChain::new(vec![Box::new(BaseFactory)]);
/// assert_eq!(chain.factory_names().collect::<Vec<_>>(), ["base"]);
///
/// // The standard chain always ends with the base factory.
/// assert_eq!(FactoryChain::standard().factory_names().last(), Some("base"));
/// ```
pub struct FactoryChain {
    factories: Vec<Box<dyn ContainerFactory>>,
}

static STANDARD: LazyLock<FactoryChain> = LazyLock::new(|| {
    let mut factories: Vec<Box<dyn ContainerFactory>> = Vec::new();

    crate::cfg::grid! {
        factories.push(Box::new(crate::container::grid::GridFactory));
    }
    crate::cfg::collect! {
        factories.push(Box::new(crate::container::collect::CollectFactory));
    }
    factories.push(Box::new(crate::container::base::BaseFactory));

    let chain = FactoryChain::new(factories);
    debug!(
        "standard container factory chain: [{}]",
        chain.factory_names().collect::<Vec<_>>().join(", ")
    );
    chain
});

impl FactoryChain {
    /// Creates a chain from factories in priority order.
    #[inline]
    pub fn new(factories: Vec<Box<dyn ContainerFactory>>) -> Self {
        Self { factories }
    }

    /// Returns the process-wide chain of every compiled-in family.
    ///
    /// Built once at first use, immutable afterwards.
    #[inline]
    pub fn standard() -> &'static FactoryChain {
        &STANDARD
    }

    /// Iterates over the factory names in priority order.
    pub fn factory_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.iter().map(|factory| factory.name())
    }

    /// Iterates over the container kinds of every factory, in priority order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static ContainerKind> + '_ {
        self.factories.iter().flat_map(|factory| factory.kinds())
    }

    /// Creates a cursor, `None` if the value is not a handled container.
    pub fn read<'a>(
        &self,
        value: &'a Value,
        declared: &TypeDescriptor,
        options: ReadOptions,
    ) -> Option<Box<dyn ReadContainer + 'a>> {
        self.factories
            .iter()
            .find_map(|factory| factory.read(value, declared, options))
    }

    /// Creates a builder from the declared type.
    pub fn write_for_type(&self, declared: &TypeDescriptor) -> Option<Box<dyn WriteContainer>> {
        self.factories
            .iter()
            .find_map(|factory| factory.write_for_type(declared))
    }

    /// Creates a builder from a wire tag.
    pub fn write_for_tag(
        &self,
        tag: &str,
        declared: &TypeDescriptor,
    ) -> Option<Box<dyn WriteContainer>> {
        self.factories
            .iter()
            .find_map(|factory| factory.write_for_tag(tag, declared))
    }

    /// Creates a builder from a tag when present, the declared type otherwise.
    pub fn write(
        &self,
        tag: Option<&str>,
        declared: &TypeDescriptor,
    ) -> Option<Box<dyn WriteContainer>> {
        match tag {
            Some(tag) => self.write_for_tag(tag, declared),
            None => self.write_for_type(declared),
        }
    }

    /// Creates a builder for the container behind `cursor`.
    ///
    /// Uses the cursor's [`meta_type`](ReadContainer::meta_type) when the
    /// declared type does not imply the runtime kind, `declared` otherwise.
    pub fn write_like(
        &self,
        cursor: &dyn ReadContainer,
        declared: &TypeDescriptor,
    ) -> Option<Box<dyn WriteContainer>> {
        if cursor.meta_type_required() {
            self.write_for_type(&cursor.meta_type())
        } else {
            self.write_for_type(declared)
        }
    }

    /// Creates a cursor over an element of `parent`.
    ///
    /// The parent's declared value type becomes the child's declared type.
    #[inline]
    pub fn read_child<'a>(
        &self,
        value: &'a Value,
        parent: &dyn ReadContainer,
        options: ReadOptions,
    ) -> Option<Box<dyn ReadContainer + 'a>> {
        self.read(value, &parent.value_type(), options)
    }

    /// Creates a builder for an element of `parent`.
    #[inline]
    pub fn write_child(
        &self,
        tag: Option<&str>,
        parent: &dyn WriteContainer,
    ) -> Option<Box<dyn WriteContainer>> {
        self.write(tag, &parent.value_type())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use bw_utils::hash::HashMap;

    use super::FactoryChain;
    use crate::Value;
    use crate::container::base::{BaseFactory, LIST};
    use crate::container::{ReadContainer, ReadOptions, WriteContainer};
    use crate::info::{TypeDescriptor, Typed};

    /// Copies `value` through a cursor and a builder, the way a format
    /// writer followed by a format reader would.
    pub(crate) fn transcode(
        chain: &FactoryChain,
        value: &Value,
        declared: &TypeDescriptor,
        options: ReadOptions,
    ) -> Value {
        let mut cursor = chain.read(value, declared, options).unwrap();
        let mut builder = chain.write_like(&*cursor, declared).unwrap();
        copy(chain, &mut *cursor, &mut *builder, options);
        builder.build()
    }

    fn copy(
        chain: &FactoryChain,
        cursor: &mut dyn ReadContainer,
        builder: &mut dyn WriteContainer,
        options: ReadOptions,
    ) {
        if let (Some(rows), Some(columns)) = (cursor.dimension_size(0), cursor.dimension_size(1)) {
            builder.dimensions(&[rows, columns]).unwrap();
        }
        while cursor.has_next() {
            cursor.advance();
            let value = cursor.value().unwrap();
            let value = match chain.read_child(value, cursor, options) {
                Some(mut child) => {
                    let declared = builder.value_type();
                    let mut child_builder = chain.write_like(&*child, &declared).unwrap();
                    copy(chain, &mut *child, &mut *child_builder, options);
                    child_builder.build()
                }
                None => value.clone(),
            };
            builder
                .add(cursor.key().cloned(), cursor.column().cloned(), value, cursor.count())
                .unwrap();
        }
    }

    fn map_of_list() -> Value {
        let list = vec![Value::from(1_i32), Value::from(2_i32)];
        let mut map: HashMap<Value, Value> = HashMap::default();
        map.insert(Value::from("a"), Value::container(list));
        Value::container(map)
    }

    #[test]
    fn typed_parent_propagates_to_children() {
        let chain = FactoryChain::new(vec![Box::new(BaseFactory)]);
        let options = ReadOptions::default();
        let map = map_of_list();
        let declared = <HashMap<String, Vec<i32>>>::type_descriptor();

        let mut cursor = chain.read(&map, &declared, options).unwrap();
        assert!(!cursor.meta_type_required());
        cursor.advance();
        let child = chain
            .read_child(cursor.value().unwrap(), &*cursor, options)
            .unwrap();
        assert_eq!(child.value_type(), i32::type_descriptor());
        assert!(!child.meta_type_required());

        let builder = chain.write_for_type(&declared).unwrap();
        let child_builder = chain.write_child(None, &*builder).unwrap();
        assert_eq!(child_builder.kind(), &LIST);
        assert_eq!(child_builder.value_type(), i32::type_descriptor());
        let child_builder = chain.write_like(&*child, &builder.value_type()).unwrap();
        assert_eq!(child_builder.value_type(), i32::type_descriptor());

        assert_eq!(transcode(&chain, &map, &declared, options), map);
    }

    #[test]
    fn mismatched_parent_leaves_children_untyped() {
        let chain = FactoryChain::new(vec![Box::new(BaseFactory)]);
        let options = ReadOptions::default();
        let map = map_of_list();
        let declared = <HashMap<String, i32>>::type_descriptor();

        let mut cursor = chain.read(&map, &declared, options).unwrap();
        cursor.advance();
        let child = chain
            .read_child(cursor.value().unwrap(), &*cursor, options)
            .unwrap();
        assert!(child.meta_type_required());
        assert_eq!(child.meta_tag(), "List");
        assert!(child.value_type().is_any());

        let builder = chain.write_for_type(&declared).unwrap();
        let child_builder = chain.write_like(&*child, &builder.value_type()).unwrap();
        assert_eq!(child_builder.kind(), &LIST);
        assert!(child_builder.value_type().is_any());

        assert_eq!(transcode(&chain, &map, &declared, options), map);
    }

    #[test]
    fn custom_chain_order() {
        let chain = FactoryChain::new(vec![Box::new(BaseFactory)]);
        assert_eq!(chain.factory_names().count(), 1);
        assert!(chain.write_for_tag("List", &TypeDescriptor::any()).is_some());
        assert!(chain.write_for_tag("Nope", &TypeDescriptor::any()).is_none());
    }

    #[test]
    fn standard_chain_families() {
        let names: Vec<_> = FactoryChain::standard().factory_names().collect();
        assert_eq!(names.last(), Some(&"base"));
        assert_eq!(names.contains(&"collect"), cfg!(feature = "collect"));
        assert_eq!(names.contains(&"grid"), cfg!(feature = "grid"));
    }
}
