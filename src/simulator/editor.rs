//! Property edits submitted by the editor panel.
//!
//! Raw form values are parsed and validated here, before they reach the
//! body store or the graph. A rejected edit changes nothing.

use crate::error::EditError;
use crate::simulator::components::{bodies::BodyUpdate, connections::ConnectionUpdate};

/// Editable fields of a sphere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SphereEdit {
    pub mass: Option<f64>,
    pub locked: Option<bool>,
}

impl SphereEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Parses `(field, value)` pairs as submitted by a form.
    /// Blank values leave the field unset.
    pub fn from_form<'a, I>(fields: I) -> Result<Self, EditError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut edit = Self::default();
        for (field, value) in fields {
            match field {
                "mass" => edit.mass = parse_number("mass", value)?,
                "locked" => edit.locked = parse_flag("locked", value)?,
                other => return Err(EditError::UnknownField(other.to_string())),
            }
        }
        edit.validate()?;
        Ok(edit)
    }

    pub fn validate(&self) -> Result<(), EditError> {
        match self.mass {
            Some(mass) => check_mass(mass),
            None => Ok(()),
        }
    }

    pub(crate) fn into_update(self) -> BodyUpdate {
        BodyUpdate {
            mass: self.mass,
            locked: self.locked,
            ..BodyUpdate::default()
        }
    }
}

/// Editable fields of a connection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionEdit {
    pub length: Option<f64>,
    pub spring_constant: Option<f64>,
    pub damping_constant: Option<f64>,
}

impl ConnectionEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn spring_constant(mut self, spring_constant: f64) -> Self {
        self.spring_constant = Some(spring_constant);
        self
    }

    pub fn damping_constant(mut self, damping_constant: f64) -> Self {
        self.damping_constant = Some(damping_constant);
        self
    }

    /// Parses `(field, value)` pairs as submitted by a form. Field names are
    /// accepted in camelCase or snake_case. Blank values leave the field unset.
    pub fn from_form<'a, I>(fields: I) -> Result<Self, EditError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut edit = Self::default();
        for (field, value) in fields {
            match field {
                "length" => edit.length = parse_number("length", value)?,
                "springConstant" | "spring_constant" => {
                    edit.spring_constant = parse_number("springConstant", value)?
                }
                "dampingConstant" | "damping_constant" => {
                    edit.damping_constant = parse_number("dampingConstant", value)?
                }
                other => return Err(EditError::UnknownField(other.to_string())),
            }
        }
        edit.validate()?;
        Ok(edit)
    }

    pub fn validate(&self) -> Result<(), EditError> {
        if let Some(length) = self.length {
            if !length.is_finite() {
                return Err(EditError::NotFinite { field: "length" });
            }
            if length < 0.0 {
                return Err(EditError::NegativeLength(length));
            }
        }
        if let Some(k) = self.spring_constant {
            if !k.is_finite() {
                return Err(EditError::NotFinite { field: "springConstant" });
            }
            if k <= 0.0 {
                return Err(EditError::NonPositiveSpringConstant(k));
            }
        }
        if let Some(c) = self.damping_constant {
            if !c.is_finite() {
                return Err(EditError::NotFinite { field: "dampingConstant" });
            }
            if c < 0.0 {
                return Err(EditError::NegativeDampingConstant(c));
            }
        }
        Ok(())
    }

    pub(crate) fn into_update(self) -> ConnectionUpdate {
        ConnectionUpdate {
            length: self.length,
            spring_constant: self.spring_constant,
            damping_constant: self.damping_constant,
        }
    }
}

/// A sphere mass must be finite and positive.
pub(crate) fn check_mass(mass: f64) -> Result<(), EditError> {
    if !mass.is_finite() {
        return Err(EditError::NotFinite { field: "mass" });
    }
    if mass <= 0.0 {
        return Err(EditError::NonPositiveMass(mass));
    }
    Ok(())
}

fn parse_number(field: &'static str, value: &str) -> Result<Option<f64>, EditError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let number = value.parse::<f64>().map_err(|_| EditError::NotNumeric {
        field,
        value: value.to_string(),
    })?;
    if !number.is_finite() {
        return Err(EditError::NotFinite { field });
    }
    Ok(Some(number))
}

fn parse_flag(field: &'static str, value: &str) -> Result<Option<bool>, EditError> {
    match value.trim() {
        "" => Ok(None),
        "true" | "on" | "1" => Ok(Some(true)),
        "false" | "off" | "0" => Ok(Some(false)),
        other => Err(EditError::NotNumeric {
            field,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_value_is_unset() {
        assert_eq!(parse_number("mass", "  "), Ok(None));
    }

    #[test]
    fn infinity_is_rejected() {
        assert_eq!(
            parse_number("length", "inf"),
            Err(EditError::NotFinite { field: "length" })
        );
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(parse_flag("locked", "on"), Ok(Some(true)));
        assert_eq!(parse_flag("locked", "0"), Ok(Some(false)));
        assert!(parse_flag("locked", "maybe").is_err());
    }
}
