//! Greedy placement of flexible energy across the hourly horizon.

use std::cmp::Ordering;

use super::types::WorkloadHour;

/// A request to place flexible energy before a deadline.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRequest {
    /// Total flexible energy to place (kWh, >= 0).
    pub total_flex_kwh: f64,
    /// Last hour index (inclusive) eligible to receive flexible energy.
    pub deadline_hour: usize,
}

/// Result of the greedy allocation pass.
#[derive(Debug, Clone)]
pub struct FlexPlan {
    /// Flexible energy assigned to each hour (kWh, one entry per hour).
    pub per_hour_kwh: Vec<f64>,
    /// Budget that could not be placed within capacity and deadline (kWh).
    pub unallocated_kwh: f64,
}

/// Greedily fills the cheapest eligible hours with flexible energy.
///
/// `rates` holds each hour's marginal objective cost per kWh (computed by
/// the base pass). Eligible hours are those at or before the deadline with
/// positive capacity; they are filled cheapest-first, ties going to the
/// earlier hour. Each hour receives at most its capacity, the total never
/// exceeds the budget, and any remainder is reported rather than dropped.
///
/// Greedy fill is only optimal under the model's assumption that the
/// marginal cost per added kWh is constant within an hour; re-selection of
/// the cooling mode after allocation can shift totals slightly.
pub fn allocate_flex(
    rates: &[f64],
    workload: &[WorkloadHour],
    request: &ScheduleRequest,
) -> FlexPlan {
    debug_assert_eq!(rates.len(), workload.len());

    let mut eligible: Vec<(usize, f64)> = workload
        .iter()
        .zip(rates)
        .enumerate()
        .filter(|(t, (w, _))| *t <= request.deadline_hour && w.flex_capacity_kwh > 0.0)
        .map(|(t, (_, &rate))| (t, rate))
        .collect();

    // Cheapest rate first; earlier hour on equal rates.
    eligible.sort_by(|a, b| match a.1.partial_cmp(&b.1) {
        Some(Ordering::Equal) | None => a.0.cmp(&b.0),
        Some(ord) => ord,
    });

    let mut per_hour_kwh = vec![0.0; workload.len()];
    let mut remaining = request.total_flex_kwh;
    for (hour, _rate) in eligible {
        if remaining <= 0.0 {
            break;
        }
        let take = remaining.min(workload[hour].flex_capacity_kwh);
        per_hour_kwh[hour] = take;
        remaining -= take;
    }

    FlexPlan {
        per_hour_kwh,
        unallocated_kwh: remaining.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workload(caps: &[f64]) -> Vec<WorkloadHour> {
        caps.iter()
            .enumerate()
            .map(|(hour, &flex_capacity_kwh)| WorkloadHour {
                hour,
                base_kwh: 100.0,
                flex_capacity_kwh,
            })
            .collect()
    }

    #[test]
    fn fills_cheapest_hours_first() {
        let wl = workload(&[50.0, 50.0, 50.0, 50.0]);
        let rates = [4.0, 1.0, 3.0, 2.0];
        let plan = allocate_flex(
            &rates,
            &wl,
            &ScheduleRequest {
                total_flex_kwh: 120.0,
                deadline_hour: 3,
            },
        );
        // Cheapest order: h1, h3, h2 — 50 + 50 + 20.
        assert_eq!(plan.per_hour_kwh, vec![0.0, 50.0, 20.0, 50.0]);
        assert_eq!(plan.unallocated_kwh, 0.0);
    }

    #[test]
    fn respects_per_hour_capacity() {
        let wl = workload(&[10.0, 200.0, 30.0]);
        let rates = [1.0, 1.5, 2.0];
        let plan = allocate_flex(
            &rates,
            &wl,
            &ScheduleRequest {
                total_flex_kwh: 500.0,
                deadline_hour: 2,
            },
        );
        for (alloc, w) in plan.per_hour_kwh.iter().zip(&wl) {
            assert!(*alloc >= 0.0 && *alloc <= w.flex_capacity_kwh);
        }
    }

    #[test]
    fn never_allocates_past_deadline() {
        let wl = workload(&[100.0, 100.0, 100.0, 100.0]);
        let rates = [5.0, 5.0, 0.1, 0.1]; // cheapest hours are ineligible
        let plan = allocate_flex(
            &rates,
            &wl,
            &ScheduleRequest {
                total_flex_kwh: 150.0,
                deadline_hour: 1,
            },
        );
        assert_eq!(plan.per_hour_kwh[2], 0.0);
        assert_eq!(plan.per_hour_kwh[3], 0.0);
        assert_eq!(plan.per_hour_kwh.iter().sum::<f64>(), 150.0);
    }

    #[test]
    fn reports_exact_shortfall() {
        let wl = workload(&[40.0, 60.0, 500.0]);
        let rates = [1.0, 1.0, 1.0];
        let plan = allocate_flex(
            &rates,
            &wl,
            &ScheduleRequest {
                total_flex_kwh: 250.0,
                deadline_hour: 1,
            },
        );
        // Only 100 kWh of capacity by the deadline.
        assert_eq!(plan.unallocated_kwh, 150.0);
        assert_eq!(plan.per_hour_kwh.iter().sum::<f64>(), 100.0);
    }

    #[test]
    fn equal_rates_favor_earlier_hour() {
        let wl = workload(&[80.0, 80.0]);
        let rates = [2.0, 2.0];
        let plan = allocate_flex(
            &rates,
            &wl,
            &ScheduleRequest {
                total_flex_kwh: 80.0,
                deadline_hour: 1,
            },
        );
        assert_eq!(plan.per_hour_kwh, vec![80.0, 0.0]);
    }

    #[test]
    fn zero_budget_allocates_nothing() {
        let wl = workload(&[50.0, 50.0]);
        let plan = allocate_flex(
            &[1.0, 2.0],
            &wl,
            &ScheduleRequest {
                total_flex_kwh: 0.0,
                deadline_hour: 1,
            },
        );
        assert!(plan.per_hour_kwh.iter().all(|&a| a == 0.0));
        assert_eq!(plan.unallocated_kwh, 0.0);
    }

    #[test]
    fn zero_capacity_hours_are_skipped() {
        let wl = workload(&[0.0, 50.0, 0.0]);
        let plan = allocate_flex(
            &[0.5, 1.0, 0.5],
            &wl,
            &ScheduleRequest {
                total_flex_kwh: 30.0,
                deadline_hour: 2,
            },
        );
        assert_eq!(plan.per_hour_kwh, vec![0.0, 30.0, 0.0]);
    }
}
