//! SVD-flavoured XML export of a register map.

use crate::{Register, RegisterMap};
use eyre::{eyre, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename = "peripheral", rename_all = "camelCase")]
struct PeripheralXml<'a> {
    name: &'a str,
    registers: RegistersXml<'a>,
}

#[derive(Debug, Serialize)]
struct RegistersXml<'a> {
    register: Vec<RegisterXml<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterXml<'a> {
    name: &'a str,
    address: String,
    size: usize,
    access: &'static str,
    protected: bool,
    fields: FieldsXml<'a>,
}

#[derive(Clone, Debug, Serialize)]
struct FieldsXml<'a> {
    field: Vec<FieldXml<'a>>,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldXml<'a> {
    name: &'a str,
    bit_offset: usize,
    bit_width: usize,
}

impl<'a> From<&'a Register> for FieldsXml<'a> {
    fn from(register: &'a Register) -> Self {
        let mut field = register
            .bit_ranges()
            .filter_map(|range| {
                range.owner.map(|name| FieldXml {
                    name,
                    bit_offset: range.low,
                    bit_width: range.width(),
                })
            })
            .collect::<Vec<_>>();
        field.reverse();
        Self { field }
    }
}

/// One `<register>` element per instance of `register`.
fn instances(register: &Register) -> impl Iterator<Item = RegisterXml<'_>> {
    let fields = FieldsXml::from(register);
    register.addresses.iter().map(move |address| RegisterXml {
        name: &register.name,
        address: format!("0x{:04X}", address),
        size: register.width(),
        access: "read-write",
        protected: register.locked,
        fields: fields.clone(),
    })
}

/// Serializes `map` as a `<peripheral>` element.
pub fn to_svd(map: &RegisterMap) -> Result<String> {
    let peripheral = PeripheralXml {
        name: map.module(),
        registers: RegistersXml { register: map.registers().flat_map(instances).collect() },
    };
    quick_xml::se::to_string(&peripheral).map_err(|err| eyre!("{}", err))
}
