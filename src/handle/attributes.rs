use super::Handle;
use crate::error::Error;
use crate::style;

/// Classes, attributes and `data-*` values.
impl Handle {
    pub fn add_class(&self, class: &str) -> Result<&Self, Error> {
        let class = class.to_string();
        self.fan_out("add_class", move |el| Ok(el.class_list().add_1(&class)?))
    }

    pub fn remove_class(&self, class: &str) -> Result<&Self, Error> {
        let class = class.to_string();
        self.fan_out("remove_class", move |el| {
            Ok(el.class_list().remove_1(&class)?)
        })
    }

    /// Add `class` to elements that lack it and remove it from those that
    /// have it, element by element.
    pub fn toggle_class(&self, class: &str) -> Result<&Self, Error> {
        let class = class.to_string();
        self.fan_out("toggle_class", move |el| {
            el.class_list().toggle(&class)?;
            Ok(())
        })
    }

    /// Set attribute `name` to `value`.
    pub fn set(&self, name: &str, value: &str) -> Result<&Self, Error> {
        let name = name.to_string();
        let value = value.to_string();
        self.fan_out("set", move |el| Ok(el.set_attribute(&name, &value)?))
    }

    /// Remove attribute `name`.
    pub fn unset(&self, name: &str) -> Result<&Self, Error> {
        let name = name.to_string();
        self.fan_out("unset", move |el| Ok(el.remove_attribute(&name)?))
    }

    /// Toggle the presence of the boolean attribute `name`.
    pub fn toggle(&self, name: &str) -> Result<&Self, Error> {
        let name = name.to_string();
        self.fan_out("toggle", move |el| {
            el.toggle_attribute(&name)?;
            Ok(())
        })
    }

    /// The equivalent of `element.dataset[key] = value`: `data("userId", ..)`
    /// sets `data-user-id`.
    pub fn data(&self, key: &str, value: &str) -> Result<&Self, Error> {
        let key = key.to_string();
        let value = value.to_string();
        self.fan_out("data", move |el| {
            let name = style::dataset_attribute_name(&key)?;
            Ok(el.set_attribute(&name, &value)?)
        })
    }
}
