use super::StatKind;

/// One value per [`StatKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatTable<T> {
    pub health: T,
    pub damage: T,
    pub attacks_per_second: T,
    pub move_speed: T,
    pub range: T,
}

impl<T> StatTable<T> {
    pub const fn new(health: T, damage: T, attacks_per_second: T, move_speed: T, range: T) -> Self {
        Self {
            health,
            damage,
            attacks_per_second,
            move_speed,
            range,
        }
    }

    pub fn get(&self, stat: StatKind) -> &T {
        match stat {
            StatKind::Health => &self.health,
            StatKind::Damage => &self.damage,
            StatKind::AttacksPerSecond => &self.attacks_per_second,
            StatKind::MoveSpeed => &self.move_speed,
            StatKind::Range => &self.range,
        }
    }

    pub fn get_mut(&mut self, stat: StatKind) -> &mut T {
        match stat {
            StatKind::Health => &mut self.health,
            StatKind::Damage => &mut self.damage,
            StatKind::AttacksPerSecond => &mut self.attacks_per_second,
            StatKind::MoveSpeed => &mut self.move_speed,
            StatKind::Range => &mut self.range,
        }
    }

    /// Iterates `(stat, value)` pairs in [`StatKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, &T)> {
        StatKind::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(StatKind, &T) -> U) -> StatTable<U> {
        StatTable {
            health: f(StatKind::Health, &self.health),
            damage: f(StatKind::Damage, &self.damage),
            attacks_per_second: f(StatKind::AttacksPerSecond, &self.attacks_per_second),
            move_speed: f(StatKind::MoveSpeed, &self.move_speed),
            range: f(StatKind::Range, &self.range),
        }
    }
}

impl<T: Clone> StatTable<T> {
    pub fn splat(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value.clone(), value.clone(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_mut_targets_the_named_field() {
        let mut table = StatTable::splat(0u32);
        *table.get_mut(StatKind::MoveSpeed) += 3;

        assert_eq!(table.move_speed, 3);
        assert_eq!(
            table.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
            vec![0, 0, 0, 3, 0]
        );
    }
}
