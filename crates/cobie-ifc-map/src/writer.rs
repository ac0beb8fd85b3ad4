//! The property/quantity writer.
//!
//! One writer serves one conversion run against one target store. The
//! upstream traversal calls [`PropertyWriter::write`] once per source
//! value per target object; the writer decides whether the destination
//! is a quantity set or a generic property set, converts the value,
//! and creates or reuses the grouping container before attaching the
//! member.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use cobie_model::{AttributeValue, ValuePayload};
use ifc_store::{
    IfcStore, ObjectId, PhysicalQuantity, PropertySetDef, PropertyValue, QuantityMeasure, SetId,
    SingleValueProperty, UnitDescriptor, UnitKind,
};

use crate::config::{PropertyMap, TargetProperty};
use crate::error::WriteError;

/// Container-name prefixes that mark a quantity-set destination.
/// IFC4 names quantity sets `Qto_*`; most 2x3 authoring tools used
/// `BaseQuantities`.
const QUANTITY_SET_PREFIXES: [&str; 2] = ["qto_", "basequantities"];

fn is_quantity_set_name(name: &str) -> bool {
    QUANTITY_SET_PREFIXES.iter().any(|prefix| {
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Building-wide fallback units, used only when a source value carries
/// no unit name of its own. The traversal picks the field that matches
/// the property being written.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUnits {
    pub linear: Option<UnitDescriptor>,
    pub area: Option<UnitDescriptor>,
    pub volume: Option<UnitDescriptor>,
    pub currency: Option<UnitDescriptor>,
}

impl DefaultUnits {
    /// The default unit for a category, where one makes sense.
    #[must_use]
    pub fn for_kind(&self, kind: UnitKind) -> Option<UnitDescriptor> {
        match kind {
            UnitKind::Length => self.linear,
            UnitKind::Area => self.area,
            UnitKind::Volume => self.volume,
            UnitKind::Currency => self.currency,
            UnitKind::Mass | UnitKind::Time | UnitKind::UserDefined => None,
        }
    }
}

/// What a successful write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was absent; nothing was written.
    Skipped,
    /// A member was attached to this container.
    Written { set: SetId },
}

/// Object-to-containers index, built once from a full scan of the
/// store's attachment relations and kept current as the writer creates
/// containers. A cache over the relations, never the source of truth.
#[derive(Debug, Default)]
struct ContainerIndex {
    by_object: BTreeMap<ObjectId, Vec<SetId>>,
}

impl ContainerIndex {
    fn scan(store: &IfcStore) -> Self {
        let mut by_object: BTreeMap<ObjectId, Vec<SetId>> = BTreeMap::new();
        for rel in store.relations() {
            for &object in &rel.objects {
                by_object.entry(object).or_default().push(rel.set);
            }
        }
        Self { by_object }
    }

    fn sets_for(&self, object: ObjectId) -> &[SetId] {
        self.by_object
            .get(&object)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn record(&mut self, object: ObjectId, set: SetId) {
        self.by_object.entry(object).or_default().push(set);
    }
}

/// Attaches converted source values to target objects as property or
/// quantity members.
///
/// The writer holds the store's exclusive borrow for its lifetime, so
/// its container index cannot drift from the relations it was scanned
/// from. One writer, one run, one store.
pub struct PropertyWriter<'a> {
    store: &'a mut IfcStore,
    map: &'a PropertyMap,
    index: ContainerIndex,
}

impl<'a> PropertyWriter<'a> {
    /// Creates a writer over `store`, scanning its existing attachment
    /// relations into the container index.
    pub fn new(store: &'a mut IfcStore, map: &'a PropertyMap) -> Self {
        let index = ContainerIndex::scan(store);
        Self { store, map, index }
    }

    pub fn store(&self) -> &IfcStore {
        self.store
    }

    /// Writes one source value to one target object.
    ///
    /// Absent values (no value at all, or an unset decimal/boolean
    /// payload) are skipped without touching the store. Every error is
    /// terminal for this one attachment attempt; the store is left
    /// unmodified on failure.
    pub fn write(
        &mut self,
        object: ObjectId,
        value: Option<&AttributeValue>,
        source_key: &str,
        default_unit: Option<UnitDescriptor>,
    ) -> Result<WriteOutcome, WriteError> {
        let Some(value) = value else {
            return Ok(WriteOutcome::Skipped);
        };
        if !value.is_specified() {
            trace!(key = source_key, %object, "skipping unspecified value");
            return Ok(WriteOutcome::Skipped);
        }

        let target = self
            .map
            .resolve(source_key)
            .ok_or_else(|| WriteError::UnmappedProperty {
                key: source_key.to_string(),
                object,
            })?
            .clone();

        // Reject foreign handles before any mutation.
        self.store.object(object)?;

        if is_quantity_set_name(&target.set_name) {
            let unit = UnitDescriptor::resolve(value.unit_name.as_deref(), default_unit);
            self.write_quantity(object, value, source_key, &target, unit)
        } else {
            self.write_property(object, value, source_key, &target)
        }
    }

    fn write_quantity(
        &mut self,
        object: ObjectId,
        value: &AttributeValue,
        source_key: &str,
        target: &TargetProperty,
        unit: UnitDescriptor,
    ) -> Result<WriteOutcome, WriteError> {
        let amount = value
            .to_f64()
            .map_err(|source| WriteError::ConversionFailed {
                key: source_key.to_string(),
                source,
            })?;
        let Some(kind) = unit.kind() else {
            return Err(WriteError::InvalidUnit {
                key: source_key.to_string(),
                set_name: target.set_name.clone(),
                member_name: target.property_name.clone(),
            });
        };
        let measure = quantity_measure(kind, amount)
            .ok_or(WriteError::UnsupportedUnitCategory { kind })?;

        let quantity = PhysicalQuantity {
            name: target.property_name.clone(),
            description: Some(provenance(source_key)),
            measure,
        };

        if let Some(set_id) = self.existing_set(object, &target.set_name) {
            match self.store.set_mut(set_id)? {
                PropertySetDef::ElementQuantity { quantities, .. } => {
                    upsert_member(quantities, quantity, |q| &q.name);
                    trace!(%object, set = %target.set_name, member = %target.property_name,
                        "reused quantity set");
                    Ok(WriteOutcome::Written { set: set_id })
                }
                PropertySetDef::PropertySet { .. } => Err(WriteError::ContainerKindMismatch {
                    set_name: target.set_name.clone(),
                }),
            }
        } else {
            let set_id = self.store.add_set(PropertySetDef::ElementQuantity {
                name: target.set_name.clone(),
                quantities: vec![quantity],
            });
            self.store.relate(set_id, object)?;
            self.index.record(object, set_id);
            debug!(%object, set = %target.set_name, member = %target.property_name,
                "created quantity set");
            Ok(WriteOutcome::Written { set: set_id })
        }
    }

    fn write_property(
        &mut self,
        object: ObjectId,
        value: &AttributeValue,
        source_key: &str,
        target: &TargetProperty,
    ) -> Result<WriteOutcome, WriteError> {
        // Specified values always carry a payload.
        let Some(converted) = property_value(&value.payload) else {
            return Ok(WriteOutcome::Skipped);
        };
        let property = SingleValueProperty {
            name: target.property_name.clone(),
            value: converted,
        };

        if let Some(set_id) = self.existing_set(object, &target.set_name) {
            match self.store.set_mut(set_id)? {
                PropertySetDef::PropertySet { properties, .. } => {
                    upsert_member(properties, property, |p| &p.name);
                    trace!(%object, set = %target.set_name, member = %target.property_name,
                        "reused property set");
                    Ok(WriteOutcome::Written { set: set_id })
                }
                PropertySetDef::ElementQuantity { .. } => Err(WriteError::ContainerKindMismatch {
                    set_name: target.set_name.clone(),
                }),
            }
        } else {
            let set_id = self.store.add_set(PropertySetDef::PropertySet {
                name: target.set_name.clone(),
                properties: vec![property],
            });
            self.store.relate(set_id, object)?;
            self.index.record(object, set_id);
            debug!(%object, set = %target.set_name, member = %target.property_name,
                "created property set");
            Ok(WriteOutcome::Written { set: set_id })
        }
    }

    /// Finds a container already attached to `object` with the mapped
    /// name, whatever its kind. Guarantees at most one container per
    /// (object, name) pair ever exists.
    fn existing_set(&self, object: ObjectId, name: &str) -> Option<SetId> {
        self.index
            .sets_for(object)
            .iter()
            .copied()
            .find(|&id| self.store.set(id).is_ok_and(|set| set.name() == name))
    }
}

/// Overwrites the member with the same name, appends otherwise.
fn upsert_member<T>(members: &mut Vec<T>, member: T, name: impl Fn(&T) -> &str) {
    let member_name = name(&member).to_string();
    if let Some(existing) = members.iter_mut().find(|m| name(m) == member_name) {
        *existing = member;
    } else {
        members.push(member);
    }
}

/// Selects the quantity variant for a unit category. User-defined
/// units become counts; currency is not a physical quantity.
fn quantity_measure(kind: UnitKind, amount: f64) -> Option<QuantityMeasure> {
    match kind {
        UnitKind::Area => Some(QuantityMeasure::Area(amount)),
        UnitKind::Length => Some(QuantityMeasure::Length(amount)),
        UnitKind::Mass => Some(QuantityMeasure::Weight(amount)),
        UnitKind::Time => Some(QuantityMeasure::Time(amount)),
        UnitKind::Volume => Some(QuantityMeasure::Volume(amount)),
        UnitKind::UserDefined => Some(QuantityMeasure::Count(amount)),
        UnitKind::Currency => None,
    }
}

fn property_value(payload: &ValuePayload) -> Option<PropertyValue> {
    match payload {
        ValuePayload::Decimal(Some(value)) => Some(PropertyValue::Real(*value)),
        ValuePayload::Text(text) => Some(PropertyValue::Text(text.clone())),
        ValuePayload::Integer(value) => Some(PropertyValue::Integer(*value)),
        ValuePayload::Boolean(Some(value)) => Some(PropertyValue::Boolean(*value)),
        ValuePayload::Decimal(None) | ValuePayload::Boolean(None) => None,
    }
}

fn provenance(source_key: &str) -> String {
    format!("Converted from COBie {source_key}")
}
