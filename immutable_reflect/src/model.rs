/* Runtime type model: one level per type of the inheritance chain, root first.
   Each level stores its own properties, so a shadowing property and the one it
   hides live in separate slots. */

use crate::errors::{ReflectError, ReflectResult};
use crate::value::Value;
use immutable_gen::synth::builder::{MaterializeStep, WriteRule};

#[derive(Debug)]
pub(crate) struct SlotModel {
    pub property: String,
    pub declared: String,
    pub zero: Value,
    pub write: WriteRule,
}

#[derive(Debug)]
pub(crate) struct LevelModel {
    pub type_name: String,
    pub slots: Vec<SlotModel>,
}

#[derive(Debug)]
pub(crate) struct TypeModel {
    pub qualified: String,
    pub levels: Vec<LevelModel>,
    pub structural_equality: bool,
    pub materialize: Vec<MaterializeStep>,
}

/* Position of a property slot: (level, slot) */
pub(crate) type SlotIndex = (usize, usize);

impl TypeModel {
    fn own_level(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn level_of(&self, view: &str) -> ReflectResult<usize> {
        self.levels
            .iter()
            .position(|l| l.type_name == view)
            .ok_or_else(|| ReflectError::NotAnAncestor {
                type_name: self.qualified.clone(),
                view: view.to_string(),
            })
    }

    /* Most-derived declaration of `property` visible from the given level */
    pub fn find_from(&self, level: usize, property: &str) -> ReflectResult<SlotIndex> {
        self.levels[..=level]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(li, l)| {
                l.slots
                    .iter()
                    .position(|s| s.property == property)
                    .map(|si| (li, si))
            })
            .ok_or_else(|| ReflectError::UnknownProperty {
                type_name: self.levels[level].type_name.clone(),
                property: property.to_string(),
            })
    }

    pub fn find(&self, property: &str) -> ReflectResult<SlotIndex> {
        self.find_from(self.own_level(), property)
    }

    pub fn find_as(&self, view: &str, property: &str) -> ReflectResult<SlotIndex> {
        self.find_from(self.level_of(view)?, property)
    }

    pub fn slot(&self, (level, slot): SlotIndex) -> &SlotModel {
        &self.levels[level].slots[slot]
    }

    pub fn zero_values(&self) -> Vec<Vec<Value>> {
        self.levels
            .iter()
            .map(|l| l.slots.iter().map(|s| s.zero.clone()).collect())
            .collect()
    }

    /* Every property a fluent setter exists for: own and inherited, most-derived first */
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for level in self.levels.iter().rev() {
            for slot in &level.slots {
                if !names.contains(&slot.property.as_str()) {
                    names.push(&slot.property);
                }
            }
        }
        names
    }
}
