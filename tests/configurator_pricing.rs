//! Property tests for configurator pricing.
//!
//! Whatever sequence of selections a customer makes, the total must equal
//! the base price plus the surcharge of every selected option.

use proptest::prelude::*;

use showroom::domain::configurator::{
    Configurator, ConfiguratorError, MultiSelectField, SingleSelectField,
};
use showroom::domain::foundation::{Price, VehicleId, VehicleSlug};
use showroom::domain::vehicle::BaseVehicle;

fn vehicle(base: u64) -> BaseVehicle {
    BaseVehicle::new(
        VehicleId::new("veh_1").unwrap(),
        VehicleSlug::new("toyota-fortuner").unwrap(),
        "Toyota",
        "Fortuner",
        Price::new(base),
    )
    .unwrap()
}

#[derive(Debug, Clone)]
enum Action {
    Select(SingleSelectField, usize),
    Toggle(MultiSelectField, usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..3, 0usize..8).prop_map(|(f, i)| Action::Select(SingleSelectField::ALL[f], i)),
        (0usize..2, 0usize..8).prop_map(|(f, i)| Action::Toggle(MultiSelectField::ALL[f], i)),
    ]
}

/// Total recomputed from scratch out of the catalogs.
fn expected_total(configurator: &Configurator) -> Price {
    let config = configurator.configuration().unwrap();
    let catalogs = configurator.catalogs();

    let singles = SingleSelectField::ALL
        .iter()
        .map(|&f| catalogs.single_price(f, config.single(f)).unwrap());
    let multis = MultiSelectField::ALL.iter().flat_map(|&f| {
        config
            .multi(f)
            .iter()
            .map(move |name| catalogs.multi_price(f, name).unwrap())
    });

    config.base_vehicle().base_price() + singles.chain(multis).sum::<Price>()
}

/// Applies an action, using an out-of-range index as an unknown option name.
fn apply(configurator: &mut Configurator, action: &Action) -> Result<Price, ConfiguratorError> {
    match *action {
        Action::Select(field, i) => {
            let name = configurator
                .catalogs()
                .single_names(field)
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| "Unlisted Option".to_string());
            configurator.select_single(field, &name)
        }
        Action::Toggle(field, i) => {
            let name = configurator
                .catalogs()
                .multi_names(field)
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| "Unlisted Option".to_string());
            configurator.toggle_multi(field, &name)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn total_always_matches_selection(
        base in 100_000u64..5_000_000u64,
        actions in prop::collection::vec(action(), 0..40),
    ) {
        let mut configurator = Configurator::standard();
        configurator.initialize(vehicle(base));

        for action in &actions {
            let before = configurator.configuration().unwrap().clone();
            match apply(&mut configurator, action) {
                Ok(total) => prop_assert_eq!(total, configurator.current_total().unwrap()),
                Err(ConfiguratorError::UnknownOption { .. }) => {
                    prop_assert_eq!(&before, configurator.configuration().unwrap());
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
            prop_assert_eq!(configurator.current_total().unwrap(), expected_total(&configurator));
        }
    }

    #[test]
    fn toggling_twice_restores_total(
        field in 0usize..2,
        index in 0usize..3,
    ) {
        let field = MultiSelectField::ALL[field];
        let mut configurator = Configurator::standard();
        configurator.initialize(vehicle(1_000_000));
        let name = configurator.catalogs().multi_names(field)[index].to_string();

        let before = configurator.current_total().unwrap();
        configurator.toggle_multi(field, &name).unwrap();
        let after = configurator.toggle_multi(field, &name).unwrap();

        prop_assert_eq!(before, after);
        prop_assert!(configurator.configuration().unwrap().multi(field).is_empty());
    }
}

#[test]
fn storefront_walkthrough() {
    let mut configurator = Configurator::standard();
    let config = configurator.initialize(vehicle(1_000_000));
    assert_eq!(config.color(), "Pearl White");
    assert_eq!(config.total_price(), Price::new(1_000_000));

    assert_eq!(
        configurator.select_single(SingleSelectField::Color, "Ruby Red"),
        Ok(Price::new(1_015_000))
    );
    assert_eq!(
        configurator.toggle_multi(MultiSelectField::Packages, "Technology Package"),
        Ok(Price::new(1_090_000))
    );
    assert_eq!(
        configurator.toggle_multi(MultiSelectField::Packages, "Technology Package"),
        Ok(Price::new(1_015_000))
    );
}

#[test]
fn reinitializing_resets_selection() {
    let mut configurator = Configurator::standard();
    configurator.initialize(vehicle(1_000_000));
    configurator
        .toggle_multi(MultiSelectField::Accessories, "Roof Rack")
        .unwrap();

    let config = configurator.initialize(vehicle(900_000));
    assert!(config.accessories().is_empty());
    assert_eq!(config.total_price(), Price::new(900_000));
}

#[test]
fn mutations_before_initialize_are_rejected() {
    let mut configurator = Configurator::standard();
    assert_eq!(
        configurator.select_single(SingleSelectField::Color, "Ruby Red"),
        Err(ConfiguratorError::Uninitialized)
    );
    assert_eq!(configurator.current_total(), Err(ConfiguratorError::Uninitialized));
}
