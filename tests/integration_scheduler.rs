//! End-to-end properties of the flexible-workload scheduler.

mod common;

use coolsim::sim::engine::simulate;
use coolsim::sim::modes::CoolingConfig;
use coolsim::sim::scheduler::ScheduleRequest;
use coolsim::sim::selector::{Weights, evaluate_mode};
use coolsim::sim::types::{EnvironmentHour, WorkloadHour};
use coolsim::sim::water::WaterSystemParams;

const HOURS: usize = 48;

#[test]
fn flex_respects_capacity_budget_and_deadline() {
    let engine = common::standard_engine(HOURS);
    let request = ScheduleRequest {
        total_flex_kwh: 2500.0,
        deadline_hour: 30,
    };
    let out = engine.run(&request).expect("valid request");

    let mut placed = 0.0;
    for r in &out.hours {
        assert!(r.flex_kwh >= 0.0 && r.flex_kwh <= 120.0, "hour {}", r.hour);
        if r.hour > 30 {
            assert_eq!(r.flex_kwh, 0.0, "hour {} is past the deadline", r.hour);
        }
        placed += r.flex_kwh;
    }
    assert!(placed <= request.total_flex_kwh + 1e-9);
    // 31 eligible hours x 120 kWh = 3720 capacity, so the budget fits.
    assert!((placed - request.total_flex_kwh).abs() < 1e-9);
    assert_eq!(out.unallocated_flex_kwh, 0.0);
}

#[test]
fn flex_lands_on_cheapest_hours() {
    let engine = common::standard_engine(HOURS);
    let rates = engine.marginal_rates();
    let request = ScheduleRequest {
        total_flex_kwh: 240.0, // exactly two full hours
        deadline_hour: HOURS - 1,
    };
    let out = engine.run(&request).expect("valid request");

    let mut ranked: Vec<usize> = (0..HOURS).collect();
    ranked.sort_by(|&a, &b| rates[a].partial_cmp(&rates[b]).unwrap().then(a.cmp(&b)));

    for &t in &ranked[..2] {
        assert_eq!(out.hours[t].flex_kwh, 120.0, "cheapest hour {t} should be full");
    }
    for &t in &ranked[2..] {
        assert_eq!(out.hours[t].flex_kwh, 0.0, "hour {t} should stay empty");
    }
}

#[test]
fn selected_mode_is_optimal_at_final_load() {
    let engine = common::standard_engine(HOURS);
    let environment = common::varied_environment(HOURS);
    let cooling = CoolingConfig::standard(1.1);
    let params = WaterSystemParams::default();
    let weights = Weights::default();

    let out = engine
        .run(&ScheduleRequest {
            total_flex_kwh: 1800.0,
            deadline_hour: HOURS - 1,
        })
        .expect("valid request");

    for r in &out.hours {
        let selected = cooling.get(&r.mode).expect("selected mode is registered");
        let selected_eval = evaluate_mode(
            selected,
            r.server_kwh,
            &environment[r.hour],
            cooling.base_pue,
            &params,
            &weights,
        );
        for mode in cooling.modes() {
            let eval = evaluate_mode(
                mode,
                r.server_kwh,
                &environment[r.hour],
                cooling.base_pue,
                &params,
                &weights,
            );
            assert!(
                selected_eval.objective <= eval.objective + 1e-9,
                "hour {}: {} beats selected {}",
                r.hour,
                mode.name,
                r.mode
            );
        }
    }
}

#[test]
fn zero_budget_reproduces_base_pass() {
    let engine = common::standard_engine(HOURS);
    let out = engine
        .run(&ScheduleRequest {
            total_flex_kwh: 0.0,
            deadline_hour: HOURS - 1,
        })
        .expect("valid request");
    assert_eq!(out.hours, engine.base_pass());
    assert!(out.hours.iter().all(|r| r.flex_kwh == 0.0));
}

#[test]
fn oversubscribed_budget_reports_exact_shortfall() {
    let engine = common::standard_engine(HOURS);
    // 13 eligible hours x 120 kWh = 1560 capacity.
    let out = engine
        .run(&ScheduleRequest {
            total_flex_kwh: 2000.0,
            deadline_hour: 12,
        })
        .expect("valid request");
    assert!((out.unallocated_flex_kwh - 440.0).abs() < 1e-9);
    assert!((out.totals.flex_kwh - 1560.0).abs() < 1e-9);
}

#[test]
fn equal_rates_break_ties_toward_earlier_hours() {
    // Two identical hours: only the first may receive a partial budget.
    let environment: Vec<EnvironmentHour> = (0..2)
        .map(|hour| EnvironmentHour {
            hour,
            dry_bulb_c: 26.0,
            rh_pct: 40.0,
            grid_water_l_per_kwh: 1.5,
            grid_carbon_kg_per_kwh: 0.4,
        })
        .collect();
    let workload: Vec<WorkloadHour> = (0..2)
        .map(|hour| WorkloadHour {
            hour,
            base_kwh: 500.0,
            flex_capacity_kwh: 100.0,
        })
        .collect();

    let out = simulate(
        environment,
        workload,
        CoolingConfig::standard(1.1),
        WaterSystemParams::default(),
        Weights::default(),
        60.0,
        1,
    )
    .expect("valid inputs");

    assert_eq!(out.hours[0].flex_kwh, 60.0);
    assert_eq!(out.hours[1].flex_kwh, 0.0);
}

#[test]
fn dry_cooler_wins_single_hot_dry_hour() {
    // Grid water is free and weights are uniform: evaporative water is a
    // pure penalty, so the dry cooler must be chosen.
    let environment = vec![EnvironmentHour {
        hour: 0,
        dry_bulb_c: 35.0,
        rh_pct: 20.0,
        grid_water_l_per_kwh: 0.0,
        grid_carbon_kg_per_kwh: 0.5,
    }];
    let workload = vec![WorkloadHour {
        hour: 0,
        base_kwh: 1000.0,
        flex_capacity_kwh: 0.0,
    }];

    let out = simulate(
        environment,
        workload,
        CoolingConfig::standard(1.1),
        WaterSystemParams::default(),
        Weights {
            w_onsite_water: 1.0,
            w_offsite_water: 1.0,
            w_carbon: 1.0,
        },
        0.0,
        0,
    )
    .expect("valid inputs");

    assert_eq!(out.hours[0].mode, "dry");
    assert_eq!(out.hours[0].onsite_consumption_l, 0.0);
    assert_eq!(out.hours[0].onsite_blowdown_l, 0.0);
    assert_eq!(out.hours[0].onsite_withdrawal_l, 0.0);
}

#[test]
fn energy_and_water_invariants_hold_everywhere() {
    let engine = common::standard_engine(HOURS);
    let out = engine
        .run(&ScheduleRequest {
            total_flex_kwh: 3000.0,
            deadline_hour: HOURS - 1,
        })
        .expect("valid request");

    for r in &out.hours {
        assert!(r.facility_kwh >= r.server_kwh, "PUE >= 1 at hour {}", r.hour);
        assert!(
            r.onsite_withdrawal_l >= r.onsite_consumption_l - 1e-9,
            "withdrawal < consumption at hour {}",
            r.hour
        );
        for v in [
            r.server_kwh,
            r.facility_kwh,
            r.onsite_consumption_l,
            r.onsite_blowdown_l,
            r.onsite_withdrawal_l,
            r.offsite_water_l,
            r.carbon_kg,
            r.flex_kwh,
        ] {
            assert!(v >= 0.0 && v.is_finite(), "bad quantity at hour {}", r.hour);
        }
    }
}

#[test]
fn higher_grid_water_intensity_raises_offsite_total() {
    // Carbon-only weights keep the mode choice fixed, so the comparison
    // isolates the grid water term.
    let weights = Weights {
        w_onsite_water: 0.0,
        w_offsite_water: 0.0,
        w_carbon: 1.0,
    };
    let make = |scale: f64| {
        let environment: Vec<EnvironmentHour> = common::varied_environment(24)
            .into_iter()
            .map(|mut e| {
                e.grid_water_l_per_kwh *= scale;
                e
            })
            .collect();
        simulate(
            environment,
            common::flat_workload(24, 700.0, 0.0),
            CoolingConfig::standard(1.1),
            WaterSystemParams::default(),
            weights,
            0.0,
            23,
        )
        .expect("valid inputs")
    };

    let base = make(1.0);
    let doubled = make(2.0);
    assert!(doubled.totals.offsite_water_l > base.totals.offsite_water_l);
    assert!((doubled.totals.offsite_water_l - 2.0 * base.totals.offsite_water_l).abs() < 1e-6);
}

#[test]
fn identical_inputs_give_identical_output() {
    let a = common::standard_engine(HOURS)
        .run(&ScheduleRequest {
            total_flex_kwh: 1400.0,
            deadline_hour: 40,
        })
        .expect("valid request");
    let b = common::standard_engine(HOURS)
        .run(&ScheduleRequest {
            total_flex_kwh: 1400.0,
            deadline_hour: 40,
        })
        .expect("valid request");

    assert_eq!(a.hours, b.hours);
    // Byte-identical, not merely approximately equal.
    assert_eq!(format!("{:?}", a.hours), format!("{:?}", b.hours));
}
