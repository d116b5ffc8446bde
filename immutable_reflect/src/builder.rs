/* Mutable builder over an immutable original.
   - The original is never absent; a builder made without one starts from the
     type's default instance.
   - Every property slot of every level has its own set-flag and backing value.
     The dirty flag and the cached result are shared by the whole chain.
   - Writes follow the write rule of the slot; materializing follows the type's
     materialize steps.
   A builder is owned and mutated by one caller at a time (`&mut self`). */

use crate::errors::{ReflectError, ReflectResult};
use crate::instance::Instance;
use crate::model::{SlotIndex, TypeModel};
use crate::value::Value;
use immutable_gen::synth::builder::{MaterializeStep, WriteStep};
use std::sync::Arc;
use tracing::trace;

#[derive(Debug)]
pub struct Builder {
    model: Arc<TypeModel>,
    original: Instance,
    set_flags: Vec<Vec<bool>>,
    values: Vec<Vec<Value>>,
    dirty: bool,
    cached: Option<Instance>,
}

impl Builder {
    pub(crate) fn from_original(original: Instance) -> Self {
        let model = Arc::clone(original.model());
        let values = model.zero_values();
        let set_flags = values.iter().map(|l| vec![false; l.len()]).collect();
        Self {
            model,
            original,
            set_flags,
            values,
            dirty: false,
            cached: None,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.model.qualified
    }

    pub fn original(&self) -> &Instance {
        &self.original
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn read(&self, (level, slot): SlotIndex) -> &Value {
        if self.set_flags[level][slot] {
            &self.values[level][slot]
        } else {
            self.original.value_at((level, slot))
        }
    }

    /// Current value: the changed one if set, otherwise the original's.
    pub fn get(&self, property: &str) -> ReflectResult<&Value> {
        let index = self.model.find(property)?;
        Ok(self.read(index))
    }

    pub fn get_as(&self, view: &str, property: &str) -> ReflectResult<&Value> {
        let index = self.model.find_as(view, property)?;
        Ok(self.read(index))
    }

    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> ReflectResult<()> {
        let index = self.model.find(property)?;
        self.write(index, value.into())
    }

    /// Writes the slot visible from an ancestor view, leaving a shadowing slot untouched.
    pub fn set_as(&mut self, view: &str, property: &str, value: impl Into<Value>) -> ReflectResult<()> {
        let index = self.model.find_as(view, property)?;
        self.write(index, value.into())
    }

    /// Fluent form of `set`.
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> ReflectResult<Self> {
        self.set(property, value)?;
        Ok(self)
    }

    /// Fluent setter computing the new value from the current one; the projection runs now.
    pub fn with_projection(
        mut self,
        property: &str,
        project: impl FnOnce(&Value) -> Value,
    ) -> ReflectResult<Self> {
        let index = self.model.find(property)?;
        let next = project(self.read(index));
        self.write(index, next)?;
        Ok(self)
    }

    fn write(&mut self, index: SlotIndex, value: Value) -> ReflectResult<()> {
        let model = Arc::clone(&self.model);
        let slot = model.slot(index);
        let found = value.kind();
        let value = value
            .coerce_like(&slot.zero)
            .ok_or_else(|| ReflectError::TypeMismatch {
                type_name: model.qualified.clone(),
                property: slot.property.clone(),
                declared: slot.declared.clone(),
                found,
            })?;
        let steps = if value == *self.original.value_at(index) {
            &slot.write.when_equal
        } else {
            &slot.write.when_different
        };
        for step in steps.iter().chain(&slot.write.always) {
            self.apply(*step, index, &value);
        }
        trace!(type_name = %model.qualified, property = %slot.property, dirty = self.dirty, "builder write");
        Ok(())
    }

    fn apply(&mut self, step: WriteStep, (level, slot): SlotIndex, value: &Value) {
        match step {
            WriteStep::ClearSetFlag => self.set_flags[level][slot] = false,
            WriteStep::ResetBackingField => {
                let zero = self.model.slot((level, slot)).zero.clone();
                self.values[level][slot] = zero;
            }
            WriteStep::RecomputeDirty => {
                self.dirty = self.set_flags.iter().flatten().any(|set| *set)
            }
            WriteStep::SetSetFlag => self.set_flags[level][slot] = true,
            WriteStep::StoreValue => self.values[level][slot] = value.clone(),
            WriteStep::MarkDirty => self.dirty = true,
            WriteStep::InvalidateCache => self.cached = None,
        }
    }

    /* Fresh instance from the current values, regardless of dirty state */
    pub(crate) fn build(&self) -> Instance {
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(level, slots)| {
                (0..slots.len())
                    .map(|slot| self.read((level, slot)).clone())
                    .collect()
            })
            .collect();
        Instance::new(Arc::clone(&self.model), values)
    }

    /// Immutable instance for the current state. Repeated calls without an
    /// intervening write return the same instance; an unchanged builder
    /// returns its original.
    pub fn to_immutable(&mut self) -> Instance {
        let model = Arc::clone(&self.model);
        for step in &model.materialize {
            match step {
                MaterializeStep::ReturnCached => {
                    if let Some(cached) = &self.cached {
                        return cached.clone();
                    }
                }
                MaterializeStep::WhenDirtyBuildNew {
                    keep_original_if_equal,
                } => {
                    if self.dirty {
                        let built = self.build();
                        let result = if *keep_original_if_equal && built == self.original {
                            self.original.clone()
                        } else {
                            built
                        };
                        self.cached = Some(result.clone());
                        return result;
                    }
                }
                MaterializeStep::CacheAndReturnOriginal => {
                    self.cached = Some(self.original.clone());
                    return self.original.clone();
                }
            }
        }
        self.original.clone()
    }
}
