//! Payroll run orchestration.
//!
//! [`PayrollEngine`] drives the run lifecycle (Draft → Processed → Paid, with
//! Draft → Cancelled as the only other exit), builds and recalculates payroll
//! details, aggregates run totals, and composes salary slips. It owns a
//! [`PayrollStore`] and is the only writer to it during processing.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    DetailStatus, PayFrequency, PayrollDetail, PayrollPeriod, RunStatus, SlipStatus, Timestamped,
};

use super::detail_builder::{DetailComputation, DetailInputs, compute_detail, validate_day_counts};
use super::slip_composer::compose_slip;
use super::store::PayrollStore;

/// The payroll engine: calculators wired to an entity store.
#[derive(Debug, Default)]
pub struct PayrollEngine {
    store: PayrollStore,
}

impl PayrollEngine {
    /// Creates an engine over an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &PayrollStore {
        &self.store
    }

    /// Write access to the underlying store, for seeding reference data.
    pub fn store_mut(&mut self) -> &mut PayrollStore {
        &mut self.store
    }

    // ------------------------------------------------------------------
    // Run lifecycle
    // ------------------------------------------------------------------

    /// Creates a draft payroll run for an organization.
    pub fn create_run(
        &mut self,
        organization_id: i64,
        name: impl Into<String>,
        frequency: PayFrequency,
        period: PayrollPeriod,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        self.store
            .create_run(organization_id, name, frequency, period, now)
    }

    /// Edits a run's name, frequency, and period. Allowed only while Draft.
    pub fn update_run_metadata(
        &mut self,
        run_id: i64,
        name: impl Into<String>,
        frequency: PayFrequency,
        period: PayrollPeriod,
        now: DateTime<Utc>,
    ) -> PayrollResult<()> {
        let organization_id = {
            let run = self.store.run(run_id)?;
            if run.status != RunStatus::Draft {
                return Err(PayrollError::InvalidRunStatus {
                    run_id,
                    status: run.status,
                    required: RunStatus::Draft,
                });
            }
            run.organization_id
        };
        self.store
            .check_run_overlap(organization_id, &period, Some(run_id))?;

        let run = self.store.run_mut(run_id)?;
        run.name = name.into();
        run.frequency = frequency;
        run.period = period;
        run.touch(now);
        Ok(())
    }

    /// Processes a draft run: recomputes totals from its details and freezes
    /// them.
    ///
    /// Rejected when the run is not Draft or has no details. Totals are
    /// straight sums over the current details; they are derived, never
    /// hand-edited.
    pub fn process_run(&mut self, run_id: i64, now: DateTime<Utc>) -> PayrollResult<()> {
        let run = self.store.run(run_id)?;
        if run.status != RunStatus::Draft {
            return Err(PayrollError::InvalidRunStatus {
                run_id,
                status: run.status,
                required: RunStatus::Draft,
            });
        }

        let details = self.store.details_for_run(run_id);
        if details.is_empty() {
            return Err(PayrollError::EmptyRun { run_id });
        }

        let mut totals = crate::models::RunTotals::default();
        for detail in &details {
            totals.gross_salary += detail.gross_salary;
            totals.total_deductions += detail.total_deductions;
            totals.total_tax += detail.total_tax;
            totals.net_salary += detail.net_salary;
            totals.employee_count += 1;
        }

        let run = self
            .store
            .transition_run(run_id, RunStatus::Draft, RunStatus::Processed, now)?;
        run.totals = totals;
        run.processed_at = Some(now);
        info!(
            run_id,
            employee_count = totals.employee_count,
            gross = %totals.gross_salary,
            net = %totals.net_salary,
            "payroll run processed"
        );
        Ok(())
    }

    /// Marks a processed run as paid, stamping the paid date.
    pub fn mark_run_paid(&mut self, run_id: i64, paid_at: DateTime<Utc>) -> PayrollResult<()> {
        let run = self
            .store
            .transition_run(run_id, RunStatus::Processed, RunStatus::Paid, paid_at)?;
        run.paid_at = Some(paid_at);
        Ok(())
    }

    /// Cancels a draft run.
    pub fn cancel_run(&mut self, run_id: i64, now: DateTime<Utc>) -> PayrollResult<()> {
        self.store
            .transition_run(run_id, RunStatus::Draft, RunStatus::Cancelled, now)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Details
    // ------------------------------------------------------------------

    /// Builds and persists one employee's payroll detail.
    ///
    /// Fails with `NoActiveSalary` when the employee has no active salary
    /// assignment, and rejects duplicates per (run, employee) before any
    /// computation, so a rejected call has no side effects. The detail is
    /// persisted in Draft status.
    pub fn create_detail(
        &mut self,
        run_id: i64,
        employee_id: i64,
        working_days: Option<u32>,
        days_worked: Option<u32>,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        validate_day_counts(working_days, days_worked)?;

        let computed = {
            let run = self.store.run(run_id)?;
            if run.status != RunStatus::Draft {
                return Err(PayrollError::InvalidRunStatus {
                    run_id,
                    status: run.status,
                    required: RunStatus::Draft,
                });
            }
            let employee = self.store.employee(employee_id)?;
            if !employee.is_active {
                return Err(PayrollError::EmployeeNotFound { id: employee_id });
            }
            if self.store.has_detail(run_id, employee_id) {
                return Err(PayrollError::DuplicateDetail {
                    run_id,
                    employee_id,
                });
            }

            let assignment = self
                .store
                .active_assignment(employee_id)
                .ok_or(PayrollError::NoActiveSalary { employee_id })?;
            let structure = self.store.structure(assignment.structure_id)?;
            let tax_configuration = self.store.active_tax_configuration(run.organization_id);

            let inputs = DetailInputs {
                employee_id,
                period: &run.period,
                structure,
                override_basic_salary: assignment.override_basic_salary,
                tax_configuration,
                periods_in_run: 1,
                working_days,
                days_worked,
            };
            compute_detail(&inputs, &self.store, &self.store)
        };

        let detail = Self::detail_from_computation(
            run_id,
            employee_id,
            working_days,
            days_worked,
            &computed,
            now,
        );
        self.store.insert_detail(detail, now)
    }

    /// Manually approves a draft detail.
    pub fn approve_detail(&mut self, detail_id: i64, now: DateTime<Utc>) -> PayrollResult<()> {
        let detail = self.store.detail_mut(detail_id)?;
        detail.status = DetailStatus::Approved;
        detail.touch(now);
        Ok(())
    }

    /// Builds a detail for every active employee of the run's organization
    /// holding an active salary assignment.
    ///
    /// Employees already present in the run are skipped, so re-running the
    /// batch is idempotent. Returns the ids of the details created.
    pub fn generate_for_all(
        &mut self,
        run_id: i64,
        working_days: Option<u32>,
        now: DateTime<Utc>,
    ) -> PayrollResult<Vec<i64>> {
        let organization_id = {
            let run = self.store.run(run_id)?;
            if run.status != RunStatus::Draft {
                return Err(PayrollError::InvalidRunStatus {
                    run_id,
                    status: run.status,
                    required: RunStatus::Draft,
                });
            }
            run.organization_id
        };

        let mut created = Vec::new();
        for employee_id in self.store.employees_in_organization(organization_id) {
            if self.store.has_detail(run_id, employee_id) {
                continue;
            }
            if self.store.active_assignment(employee_id).is_none() {
                continue;
            }
            let detail_id = self.create_detail(run_id, employee_id, working_days, None, now)?;
            created.push(detail_id);
        }
        info!(run_id, created = created.len(), "batch detail generation");
        Ok(created)
    }

    /// Re-derives every detail of a draft run from current leave, benefit,
    /// and tax state.
    ///
    /// The recorded `working_days`/`days_worked` are kept as-is; applying
    /// this twice over unchanged inputs yields identical amounts.
    pub fn recalculate_all(&mut self, run_id: i64, now: DateTime<Utc>) -> PayrollResult<()> {
        {
            let run = self.store.run(run_id)?;
            if run.status != RunStatus::Draft {
                return Err(PayrollError::InvalidRunStatus {
                    run_id,
                    status: run.status,
                    required: RunStatus::Draft,
                });
            }
        }

        let detail_ids: Vec<i64> = self
            .store
            .details_for_run(run_id)
            .iter()
            .map(|d| d.id)
            .collect();

        for detail_id in detail_ids {
            let (employee_id, working_days, days_worked) = {
                let detail = self.store.detail(detail_id)?;
                (detail.employee_id, detail.working_days, detail.days_worked)
            };

            let computed = {
                let run = self.store.run(run_id)?;
                let assignment = self
                    .store
                    .active_assignment(employee_id)
                    .ok_or(PayrollError::NoActiveSalary { employee_id })?;
                let structure = self.store.structure(assignment.structure_id)?;
                let tax_configuration = self.store.active_tax_configuration(run.organization_id);

                let inputs = DetailInputs {
                    employee_id,
                    period: &run.period,
                    structure,
                    override_basic_salary: assignment.override_basic_salary,
                    tax_configuration,
                    periods_in_run: 1,
                    working_days,
                    days_worked,
                };
                compute_detail(&inputs, &self.store, &self.store)
            };

            let detail = self.store.detail_mut(detail_id)?;
            detail.gross_salary = computed.gross_salary;
            detail.leave_deduction = computed.leave.amount;
            detail.benefit_deduction = computed.benefits.amount;
            detail.total_tax = computed.tax.tax;
            detail.total_deductions = computed.total_deductions;
            detail.net_salary = computed.net_salary;
            detail.leave_days = computed.leave.leave_days;
            detail.touch(now);
        }
        Ok(())
    }

    fn detail_from_computation(
        run_id: i64,
        employee_id: i64,
        working_days: Option<u32>,
        days_worked: Option<u32>,
        computed: &DetailComputation,
        now: DateTime<Utc>,
    ) -> PayrollDetail {
        PayrollDetail {
            id: 0,
            run_id,
            employee_id,
            gross_salary: computed.gross_salary,
            leave_deduction: computed.leave.amount,
            benefit_deduction: computed.benefits.amount,
            total_tax: computed.tax.tax,
            total_deductions: computed.total_deductions,
            net_salary: computed.net_salary,
            working_days,
            days_worked,
            leave_days: computed.leave.leave_days,
            status: DetailStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    // ------------------------------------------------------------------
    // Salary slips
    // ------------------------------------------------------------------

    /// Composes and stores a salary slip for a payroll detail.
    ///
    /// The slip expands the detail's totals back into the named components of
    /// the employee's current structure. At most one slip exists per detail.
    pub fn generate_slip(
        &mut self,
        detail_id: i64,
        period_label: impl Into<String>,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        let slip = {
            let detail = self.store.detail(detail_id)?;
            if self.store.slip_for_detail(detail_id).is_some() {
                return Err(PayrollError::DuplicateSlip { detail_id });
            }
            let assignment = self
                .store
                .active_assignment(detail.employee_id)
                .ok_or(PayrollError::NoActiveSalary {
                    employee_id: detail.employee_id,
                })?;
            let structure = self.store.structure(assignment.structure_id)?;
            compose_slip(detail, structure, period_label.into(), now)
        };
        self.store.insert_slip(slip, now)
    }

    /// Approves a generated slip for distribution.
    pub fn approve_slip(&mut self, slip_id: i64, now: DateTime<Utc>) -> PayrollResult<()> {
        let slip = self.store.slip_mut(slip_id)?;
        slip.status = SlipStatus::Approved;
        slip.touch(now);
        Ok(())
    }

    /// Marks an approved slip as sent to the employee.
    pub fn send_slip(&mut self, slip_id: i64, now: DateTime<Utc>) -> PayrollResult<()> {
        let slip = self.store.slip_mut(slip_id)?;
        if slip.status != SlipStatus::Approved {
            return Err(PayrollError::InvalidSlipStatus {
                slip_id,
                status: slip.status,
                required: SlipStatus::Approved,
            });
        }
        slip.status = SlipStatus::Sent;
        slip.touch(now);
        Ok(())
    }

    /// Marks a slip as paid, recording the credited date.
    pub fn mark_slip_paid(
        &mut self,
        slip_id: i64,
        credited_date: chrono::NaiveDate,
        now: DateTime<Utc>,
    ) -> PayrollResult<()> {
        let slip = self.store.slip_mut(slip_id)?;
        slip.status = SlipStatus::Paid;
        slip.credited_date = Some(credited_date);
        slip.touch(now);
        Ok(())
    }
}
