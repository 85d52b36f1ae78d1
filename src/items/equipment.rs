use super::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An item occupying an equipment slot. Stackable ammunition and thrown
/// weapons carry a `count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub count: Option<u32>,
}

impl EquippedItem {
    pub fn new(item_id: &str, slot: EquipmentSlot) -> Self {
        Self {
            item_id: item_id.to_string(),
            slot,
            count: None,
        }
    }

    pub fn stack(item_id: &str, slot: EquipmentSlot, count: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            slot,
            count: Some(count),
        }
    }

    /// Units this entry is worth when returned to a container.
    pub fn units(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}

/// Player equipment slots.
///
/// IMPORTANT: When adding new slots, use `#[serde(default)]` to maintain
/// backward compatibility with old save files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Equipment {
    pub head: Option<EquippedItem>,
    pub neck: Option<EquippedItem>,
    pub body: Option<EquippedItem>,
    pub hand_left: Option<EquippedItem>,
    pub hand_right: Option<EquippedItem>,
    pub legs: Option<EquippedItem>,
    pub feet: Option<EquippedItem>,
    pub ring: Option<EquippedItem>,
    pub ammo: Option<EquippedItem>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        self.slot_ref(slot).as_ref()
    }

    pub fn get_mut(&mut self, slot: EquipmentSlot) -> Option<&mut EquippedItem> {
        self.slot_mut(slot).as_mut()
    }

    /// Places `item` in its own slot, returning whatever was there.
    pub fn set(&mut self, item: EquippedItem) -> Option<EquippedItem> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<EquippedItem> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &EquippedItem> {
        [
            &self.head,
            &self.neck,
            &self.body,
            &self.hand_left,
            &self.hand_right,
            &self.legs,
            &self.feet,
            &self.ring,
            &self.ammo,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<EquippedItem> {
        match slot {
            EquipmentSlot::Head => &self.head,
            EquipmentSlot::Neck => &self.neck,
            EquipmentSlot::Body => &self.body,
            EquipmentSlot::HandLeft => &self.hand_left,
            EquipmentSlot::HandRight => &self.hand_right,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Feet => &self.feet,
            EquipmentSlot::Ring => &self.ring,
            EquipmentSlot::Ammo => &self.ammo,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<EquippedItem> {
        match slot {
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Neck => &mut self.neck,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::HandLeft => &mut self.hand_left,
            EquipmentSlot::HandRight => &mut self.hand_right,
            EquipmentSlot::Legs => &mut self.legs,
            EquipmentSlot::Feet => &mut self.feet,
            EquipmentSlot::Ring => &mut self.ring,
            EquipmentSlot::Ammo => &mut self.ammo,
        }
    }
}

/// Item container keyed by item id. Used for both the backpack and the depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.items.entry(item_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Removes `quantity` units. Returns false and leaves the container
    /// untouched when fewer are available.
    pub fn remove(&mut self, item_id: &str, quantity: u32) -> bool {
        match self.items.get_mut(item_id) {
            Some(held) if *held >= quantity => {
                *held -= quantity;
                true
            }
            _ => quantity == 0,
        }
    }

    /// Removes every unit of `item_id`, returning how many there were.
    pub fn take_all(&mut self, item_id: &str) -> u32 {
        self.items.remove(item_id).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(id, qty)| (id.as_str(), *qty))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_set_uses_item_slot() {
        let mut equipment = Equipment::new();
        assert!(equipment
            .set(EquippedItem::new("leather_helmet", EquipmentSlot::Head))
            .is_none());
        let head = equipment.get(EquipmentSlot::Head).unwrap();
        assert_eq!(head.slot, EquipmentSlot::Head);
        assert!(equipment.get(EquipmentSlot::Body).is_none());
    }

    #[test]
    fn test_equipment_set_returns_previous() {
        let mut equipment = Equipment::new();
        equipment.set(EquippedItem::new("club", EquipmentSlot::HandRight));
        let old = equipment.set(EquippedItem::new("sabre", EquipmentSlot::HandRight));
        assert_eq!(old.unwrap().item_id, "club");
        assert_eq!(equipment.iter_equipped().count(), 1);
    }

    #[test]
    fn test_every_slot_round_trips() {
        let mut equipment = Equipment::new();
        for slot in EquipmentSlot::all() {
            equipment.set(EquippedItem::new("x", slot));
        }
        assert_eq!(equipment.iter_equipped().count(), 9);
        for slot in EquipmentSlot::all() {
            assert_eq!(equipment.take(slot).unwrap().slot, slot);
        }
        assert_eq!(equipment.iter_equipped().count(), 0);
    }

    #[test]
    fn test_inventory_add_remove() {
        let mut inv = Inventory::new();
        inv.add("health_potion", 3);
        assert_eq!(inv.count("health_potion"), 3);
        assert!(!inv.remove("health_potion", 4));
        assert_eq!(inv.count("health_potion"), 3);
        assert!(inv.remove("health_potion", 3));
        assert_eq!(inv.count("health_potion"), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_inventory_remove_missing_item() {
        let mut inv = Inventory::new();
        assert!(!inv.remove("gold_coin", 1));
        assert!(inv.remove("gold_coin", 0));
    }

    #[test]
    fn test_inventory_take_all() {
        let mut inv = Inventory::new();
        inv.add("arrow", 40);
        assert_eq!(inv.take_all("arrow"), 40);
        assert_eq!(inv.take_all("arrow"), 0);
    }
}
