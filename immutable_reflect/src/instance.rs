/* Immutable instances. Cloning an `Instance` shares it; there is no way to
   change the values of an existing instance. */

use crate::builder::Builder;
use crate::errors::ReflectResult;
use crate::model::{SlotIndex, TypeModel};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

struct InstanceData {
    model: Arc<TypeModel>,
    values: Vec<Vec<Value>>,
}

#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

impl Instance {
    pub(crate) fn new(model: Arc<TypeModel>, values: Vec<Vec<Value>>) -> Self {
        Instance(Arc::new(InstanceData { model, values }))
    }

    pub(crate) fn model(&self) -> &Arc<TypeModel> {
        &self.0.model
    }

    pub(crate) fn value_at(&self, (level, slot): SlotIndex) -> &Value {
        &self.0.values[level][slot]
    }

    pub fn type_name(&self) -> &str {
        &self.0.model.qualified
    }

    /// Value of a property, taking the most-derived declaration.
    pub fn get(&self, property: &str) -> ReflectResult<&Value> {
        let index = self.0.model.find(property)?;
        Ok(self.value_at(index))
    }

    /// Value of a property as seen through an ancestor type (or the type itself).
    pub fn get_as(&self, view: &str, property: &str) -> ReflectResult<&Value> {
        let index = self.0.model.find_as(view, property)?;
        Ok(self.value_at(index))
    }

    /// Properties that have a fluent setter on this type, most-derived first.
    pub fn property_names(&self) -> Vec<&str> {
        self.0.model.property_names()
    }

    /// Builder whose original is this instance.
    pub fn to_builder(&self) -> Builder {
        Builder::from_original(self.clone())
    }

    /// New instance with one property replaced; `self` when the value is unchanged.
    pub fn with(&self, property: &str, value: impl Into<Value>) -> ReflectResult<Instance> {
        let mut builder = self.to_builder();
        builder.set(property, value)?;
        Ok(builder.to_immutable())
    }

    /// Like `with`, computing the new value from the current one.
    pub fn with_projection(
        &self,
        property: &str,
        project: impl FnOnce(&Value) -> Value,
    ) -> ReflectResult<Instance> {
        let next = project(self.get(property)?);
        self.with(property, next)
    }

    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/* Structural equality when the type generates equality members, identity otherwise */
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let model = &self.0.model;
        model.structural_equality
            && model.qualified == other.0.model.qualified
            && self.0.values == other.0.values
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(&self.0.model.qualified);
        for (level, values) in self.0.model.levels.iter().zip(&self.0.values) {
            for (slot, value) in level.slots.iter().zip(values) {
                out.field(&slot.property, value);
            }
        }
        out.finish()
    }
}
