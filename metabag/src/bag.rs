//! The metadata bag: four optional blocks of key/value attributes.

use std::{collections::BTreeMap, sync::Arc};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{SharedBag, value::TypedValue};
use metabag_types::Block;

/// The attributes of one block, keyed by tag key.
pub type Attributes = FxHashMap<String, TypedValue>;

/// The canonical attribute store.
///
/// A bag holds up to four [`Block`]s, each created the first time something
/// is written to it. Reading never creates a block.
///
/// Outside this crate, a bag is only mutated through a [`crate::Writer`],
/// which validates each value before it lands here.
///
/// ## Empty blocks
///
/// A block is pruned as soon as a removal leaves it empty. A block created
/// explicitly with [`crate::Writer::add_block`] stays, even while empty,
/// until then.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataBag {
    blocks: BTreeMap<Block, Attributes>,
}

impl MetadataBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the bag for sharing between readers and writers.
    pub fn into_shared(self) -> SharedBag {
        Arc::new(RwLock::new(self))
    }

    /// Whether the block exists. This never creates it.
    pub fn has_block(&self, block: Block) -> bool {
        self.blocks.contains_key(&block)
    }

    /// Borrows a block's attributes, if the block exists.
    pub fn block(&self, block: Block) -> Option<&Attributes> {
        self.blocks.get(&block)
    }

    /// Finds one attribute.
    pub fn get(&self, block: Block, key: &str) -> Option<&TypedValue> {
        self.blocks.get(&block)?.get(key)
    }

    /// Iterates over the blocks that exist, in [`Block::ALL`] order.
    pub fn blocks(&self) -> impl Iterator<Item = (Block, &Attributes)> {
        self.blocks.iter().map(|(block, attrs)| (*block, attrs))
    }

    /// How many attributes the bag holds across all blocks.
    pub fn len(&self) -> usize {
        self.blocks.values().map(|attrs| attrs.len()).sum()
    }

    /// Whether the bag holds no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates the block if it doesn't exist yet.
    pub(crate) fn add_block(&mut self, block: Block) -> &mut Attributes {
        self.blocks.entry(block).or_insert_with(|| {
            log::trace!("Creating the {block} block.");
            Attributes::default()
        })
    }

    /// Stores an attribute, creating its block if needed.
    pub(crate) fn insert(&mut self, block: Block, key: &str, value: TypedValue) {
        log::trace!("Storing `{block}.{key}` = {value:?}");
        self.add_block(block).insert(key.to_owned(), value);
    }

    /// Removes an attribute, pruning its block if that empties it.
    pub(crate) fn remove(&mut self, block: Block, key: &str) -> Option<TypedValue> {
        let attrs = self.blocks.get_mut(&block)?;
        let removed = attrs.remove(key);

        if removed.is_some() && attrs.is_empty() {
            log::trace!("Removed the last attribute of the {block} block. Pruning it.");
            self.blocks.remove(&block);
        }

        removed
    }
}

/// Rebuilds a bag from persisted `(block, key, value)` triples.
///
/// This is for deserializers; values aren't validated.
impl<K: Into<String>> FromIterator<(Block, K, TypedValue)> for MetadataBag {
    fn from_iter<I: IntoIterator<Item = (Block, K, TypedValue)>>(iter: I) -> Self {
        let mut bag = MetadataBag::new();
        for (block, key, value) in iter {
            bag.add_block(block).insert(key.into(), value);
        }
        bag
    }
}
