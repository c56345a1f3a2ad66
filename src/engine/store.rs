//! In-memory entity store for the payroll engine.
//!
//! The store is an arena of entities keyed by integer id, with relationships
//! held as id references resolved on demand. It stands in for the storage
//! layer at the interface the engine specifies, and owns the two invariants
//! that belong to storage rather than calculation: uniqueness of
//! (run, employee) details, and at-most-one active salary assignment per
//! employee. Run status transitions are compare-and-swap on the stored
//! status so concurrent triggers cannot double-process a run.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::calculation::{compute_gross, compute_net};
use crate::config::TaxConfiguration;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    BenefitEnrollment, BenefitPlan, Employee, LeaveRequest, LeaveStatus, PayFrequency,
    PayrollDetail, PayrollPeriod, PayrollRun, RunStatus, SalaryAssignment, SalarySlip,
    SalaryStructure, Timestamped,
};

/// Read-only seam for leave data.
///
/// The detail builder consumes approved leave through this trait so that a
/// failing leave collaborator degrades to a zeroed deduction instead of
/// aborting payroll generation.
pub trait LeaveSource {
    /// Returns the employee's approved leave requests overlapping the period.
    fn approved_leave(
        &self,
        employee_id: i64,
        period: &PayrollPeriod,
    ) -> PayrollResult<Vec<LeaveRequest>>;
}

/// Read-only seam for benefit enrollment data.
pub trait BenefitSource {
    /// Returns the employee's enrollments active on the reference date,
    /// paired with their plans.
    fn active_enrollments(
        &self,
        employee_id: i64,
        reference_date: NaiveDate,
    ) -> PayrollResult<Vec<(BenefitEnrollment, BenefitPlan)>>;
}

/// Arena-style in-memory store for all payroll entities.
#[derive(Debug, Default)]
pub struct PayrollStore {
    employees: HashMap<i64, Employee>,
    structures: HashMap<i64, SalaryStructure>,
    assignments: HashMap<i64, SalaryAssignment>,
    leave_requests: HashMap<i64, LeaveRequest>,
    benefit_plans: HashMap<i64, BenefitPlan>,
    enrollments: HashMap<i64, BenefitEnrollment>,
    tax_configurations: HashMap<i64, TaxConfiguration>,
    runs: HashMap<i64, PayrollRun>,
    details: HashMap<i64, PayrollDetail>,
    detail_index: HashSet<(i64, i64)>,
    slips: HashMap<i64, SalarySlip>,
    next_id: i64,
}

impl PayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // ------------------------------------------------------------------
    // Employees
    // ------------------------------------------------------------------

    /// Inserts an employee, assigning its id.
    pub fn insert_employee(&mut self, mut employee: Employee) -> i64 {
        let id = self.next_id();
        employee.id = id;
        self.employees.insert(id, employee);
        id
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: i64) -> PayrollResult<&Employee> {
        self.employees
            .get(&id)
            .ok_or(PayrollError::EmployeeNotFound { id })
    }

    /// Returns the ids of all active employees of an organization, ordered
    /// by id for deterministic batch generation.
    pub fn employees_in_organization(&self, organization_id: i64) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .employees
            .values()
            .filter(|e| e.organization_id == organization_id && e.is_active)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    // ------------------------------------------------------------------
    // Salary structures
    // ------------------------------------------------------------------

    /// Validates and inserts a salary structure, assigning its id.
    pub fn insert_structure(
        &mut self,
        mut structure: SalaryStructure,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        structure.validate()?;
        let id = self.next_id();
        structure.id = id;
        structure.created_at = now;
        structure.touch(now);
        self.structures.insert(id, structure);
        Ok(id)
    }

    /// Looks up a salary structure by id.
    pub fn structure(&self, id: i64) -> PayrollResult<&SalaryStructure> {
        self.structures
            .get(&id)
            .ok_or(PayrollError::StructureNotFound { id })
    }

    /// Removes a structure unless an active assignment references it.
    pub fn remove_structure(&mut self, id: i64) -> PayrollResult<()> {
        if !self.structures.contains_key(&id) {
            return Err(PayrollError::StructureNotFound { id });
        }
        let in_use = self
            .assignments
            .values()
            .any(|a| a.structure_id == id && a.is_active);
        if in_use {
            return Err(PayrollError::StructureInUse { id });
        }
        self.structures.remove(&id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Salary assignments
    // ------------------------------------------------------------------

    /// Assigns a salary structure to an employee.
    ///
    /// Any previously active assignment is closed in the same operation:
    /// its end date is set to today and it is deactivated, so at most one
    /// assignment per employee is ever active. The new assignment caches
    /// the structure-implied gross and net salaries.
    pub fn assign_salary(
        &mut self,
        employee_id: i64,
        structure_id: i64,
        effective_date: NaiveDate,
        override_basic_salary: Option<Decimal>,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        self.employee(employee_id)?;
        let structure = self.structure(structure_id)?;

        if let Some(override_basic) = override_basic_salary {
            if override_basic < Decimal::ZERO {
                return Err(PayrollError::InvalidAssignment {
                    employee_id,
                    message: format!("override basic salary {} cannot be negative", override_basic),
                });
            }
        }

        let gross = compute_gross(Some(structure), override_basic_salary);
        let net = compute_net(gross.gross_salary, Some(structure));

        for assignment in self
            .assignments
            .values_mut()
            .filter(|a| a.employee_id == employee_id && a.is_active)
        {
            assignment.is_active = false;
            assignment.end_date = Some(now.date_naive());
            assignment.touch(now);
        }

        let id = self.next_id();
        let mut assignment = SalaryAssignment::new(
            id,
            employee_id,
            structure_id,
            effective_date,
            override_basic_salary,
        );
        assignment.gross_salary = gross.gross_salary;
        assignment.net_salary = net.net_salary;
        assignment.created_at = now;
        assignment.touch(now);
        self.assignments.insert(id, assignment);
        Ok(id)
    }

    /// Returns the employee's single active assignment, if any.
    pub fn active_assignment(&self, employee_id: i64) -> Option<&SalaryAssignment> {
        self.assignments
            .values()
            .find(|a| a.employee_id == employee_id && a.is_active)
    }

    /// Looks up an assignment by id.
    pub fn assignment(&self, id: i64) -> PayrollResult<&SalaryAssignment> {
        self.assignments
            .get(&id)
            .ok_or(PayrollError::AssignmentNotFound { id })
    }

    /// Closes an assignment without creating a successor.
    pub fn deactivate_assignment(&mut self, id: i64, now: DateTime<Utc>) -> PayrollResult<()> {
        let assignment = self
            .assignments
            .get_mut(&id)
            .ok_or(PayrollError::AssignmentNotFound { id })?;
        assignment.is_active = false;
        assignment.end_date = Some(now.date_naive());
        assignment.touch(now);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Leave and benefits
    // ------------------------------------------------------------------

    /// Inserts a leave request, assigning its id.
    pub fn insert_leave_request(&mut self, mut request: LeaveRequest) -> i64 {
        let id = self.next_id();
        request.id = id;
        self.leave_requests.insert(id, request);
        id
    }

    /// Inserts a benefit plan, assigning its id.
    pub fn insert_benefit_plan(&mut self, mut plan: BenefitPlan) -> i64 {
        let id = self.next_id();
        plan.id = id;
        self.benefit_plans.insert(id, plan);
        id
    }

    /// Inserts a benefit enrollment, assigning its id.
    pub fn insert_enrollment(&mut self, mut enrollment: BenefitEnrollment) -> i64 {
        let id = self.next_id();
        enrollment.id = id;
        self.enrollments.insert(id, enrollment);
        id
    }

    // ------------------------------------------------------------------
    // Tax configurations
    // ------------------------------------------------------------------

    /// Validates and inserts a tax configuration, assigning its id.
    pub fn insert_tax_configuration(
        &mut self,
        mut configuration: TaxConfiguration,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        configuration.validate()?;
        let id = self.next_id();
        configuration.id = id;
        configuration.created_at = now;
        configuration.touch(now);
        self.tax_configurations.insert(id, configuration);
        Ok(id)
    }

    /// Returns the organization's active tax configuration: latest financial
    /// year first, then most recently updated.
    pub fn active_tax_configuration(&self, organization_id: i64) -> Option<&TaxConfiguration> {
        self.tax_configurations
            .values()
            .filter(|c| c.organization_id == organization_id && c.is_active)
            .max_by_key(|c| (c.financial_year, c.updated_at))
    }

    // ------------------------------------------------------------------
    // Payroll runs
    // ------------------------------------------------------------------

    /// Creates a draft run after rejecting overlapping periods.
    ///
    /// A period overlaps when it shares any day with a non-cancelled run of
    /// the same organization.
    pub fn create_run(
        &mut self,
        organization_id: i64,
        name: impl Into<String>,
        frequency: PayFrequency,
        period: PayrollPeriod,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        self.check_run_overlap(organization_id, &period, None)?;

        let id = self.next_id();
        let mut run = PayrollRun::new(id, organization_id, name, frequency, period);
        run.created_at = now;
        run.touch(now);
        self.runs.insert(id, run);
        Ok(id)
    }

    /// Rejects a period that overlaps a non-cancelled run of the
    /// organization, optionally ignoring one run (for metadata edits).
    pub fn check_run_overlap(
        &self,
        organization_id: i64,
        period: &PayrollPeriod,
        ignore_run: Option<i64>,
    ) -> PayrollResult<()> {
        let overlapping = self.runs.values().any(|r| {
            r.organization_id == organization_id
                && r.status != RunStatus::Cancelled
                && Some(r.id) != ignore_run
                && r.period.overlaps(period)
        });
        if overlapping {
            return Err(PayrollError::OverlappingRun {
                organization_id,
                start: period.start_date,
                end: period.end_date,
            });
        }
        Ok(())
    }

    /// Looks up a run by id.
    pub fn run(&self, id: i64) -> PayrollResult<&PayrollRun> {
        self.runs.get(&id).ok_or(PayrollError::RunNotFound { id })
    }

    /// Looks up a run for mutation.
    pub fn run_mut(&mut self, id: i64) -> PayrollResult<&mut PayrollRun> {
        self.runs
            .get_mut(&id)
            .ok_or(PayrollError::RunNotFound { id })
    }

    /// Transitions a run from an expected status to a new one.
    ///
    /// The expected status is compared against the stored status in the same
    /// operation that swaps it, so two concurrent triggers cannot both
    /// succeed.
    pub fn transition_run(
        &mut self,
        run_id: i64,
        from: RunStatus,
        to: RunStatus,
        now: DateTime<Utc>,
    ) -> PayrollResult<&mut PayrollRun> {
        let run = self
            .runs
            .get_mut(&run_id)
            .ok_or(PayrollError::RunNotFound { id: run_id })?;
        if run.status != from {
            return Err(PayrollError::InvalidRunStatus {
                run_id,
                status: run.status,
                required: from,
            });
        }
        run.status = to;
        run.touch(now);
        Ok(run)
    }

    // ------------------------------------------------------------------
    // Payroll details
    // ------------------------------------------------------------------

    /// Inserts a detail, enforcing (run, employee) uniqueness.
    pub fn insert_detail(
        &mut self,
        mut detail: PayrollDetail,
        now: DateTime<Utc>,
    ) -> PayrollResult<i64> {
        let key = (detail.run_id, detail.employee_id);
        if self.detail_index.contains(&key) {
            return Err(PayrollError::DuplicateDetail {
                run_id: detail.run_id,
                employee_id: detail.employee_id,
            });
        }
        let id = self.next_id();
        detail.id = id;
        detail.created_at = now;
        detail.touch(now);
        self.details.insert(id, detail);
        self.detail_index.insert(key);
        Ok(id)
    }

    /// Looks up a detail by id.
    pub fn detail(&self, id: i64) -> PayrollResult<&PayrollDetail> {
        self.details
            .get(&id)
            .ok_or(PayrollError::DetailNotFound { id })
    }

    /// Looks up a detail for mutation.
    pub fn detail_mut(&mut self, id: i64) -> PayrollResult<&mut PayrollDetail> {
        self.details
            .get_mut(&id)
            .ok_or(PayrollError::DetailNotFound { id })
    }

    /// Returns true if the employee already has a detail in the run.
    pub fn has_detail(&self, run_id: i64, employee_id: i64) -> bool {
        self.detail_index.contains(&(run_id, employee_id))
    }

    /// Returns the run's details, ordered by id for deterministic sums.
    pub fn details_for_run(&self, run_id: i64) -> Vec<&PayrollDetail> {
        let mut details: Vec<&PayrollDetail> = self
            .details
            .values()
            .filter(|d| d.run_id == run_id)
            .collect();
        details.sort_by_key(|d| d.id);
        details
    }

    // ------------------------------------------------------------------
    // Salary slips
    // ------------------------------------------------------------------

    /// Inserts a slip, enforcing at most one per detail.
    pub fn insert_slip(&mut self, mut slip: SalarySlip, now: DateTime<Utc>) -> PayrollResult<i64> {
        if self.slip_for_detail(slip.detail_id).is_some() {
            return Err(PayrollError::DuplicateSlip {
                detail_id: slip.detail_id,
            });
        }
        let id = self.next_id();
        slip.id = id;
        slip.created_at = now;
        slip.touch(now);
        self.slips.insert(id, slip);
        Ok(id)
    }

    /// Looks up a slip by id.
    pub fn slip(&self, id: i64) -> PayrollResult<&SalarySlip> {
        self.slips.get(&id).ok_or(PayrollError::SlipNotFound { id })
    }

    /// Looks up a slip for mutation.
    pub fn slip_mut(&mut self, id: i64) -> PayrollResult<&mut SalarySlip> {
        self.slips
            .get_mut(&id)
            .ok_or(PayrollError::SlipNotFound { id })
    }

    /// Returns the slip generated from a detail, if any.
    pub fn slip_for_detail(&self, detail_id: i64) -> Option<&SalarySlip> {
        self.slips.values().find(|s| s.detail_id == detail_id)
    }
}

impl LeaveSource for PayrollStore {
    fn approved_leave(
        &self,
        employee_id: i64,
        period: &PayrollPeriod,
    ) -> PayrollResult<Vec<LeaveRequest>> {
        Ok(self
            .leave_requests
            .values()
            .filter(|r| {
                r.employee_id == employee_id
                    && r.status == LeaveStatus::Approved
                    && r.start_date <= period.end_date
                    && r.end_date >= period.start_date
            })
            .cloned()
            .collect())
    }
}

impl BenefitSource for PayrollStore {
    fn active_enrollments(
        &self,
        employee_id: i64,
        reference_date: NaiveDate,
    ) -> PayrollResult<Vec<(BenefitEnrollment, BenefitPlan)>> {
        let mut pairs = Vec::new();
        for enrollment in self
            .enrollments
            .values()
            .filter(|e| e.employee_id == employee_id && e.is_active_on(reference_date))
        {
            let plan = self.benefit_plans.get(&enrollment.plan_id).ok_or_else(|| {
                PayrollError::SourceUnavailable {
                    source_name: "benefits".to_string(),
                    message: format!("benefit plan {} not found", enrollment.plan_id),
                }
            })?;
            pairs.push((enrollment.clone(), plan.clone()));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentType, DetailStatus, SalaryComponent};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn store_with_employee_and_structure() -> (PayrollStore, i64, i64) {
        let mut store = PayrollStore::new();
        let employee_id = store.insert_employee(Employee::new(0, 1, "Chanda Mwila"));
        let mut structure = SalaryStructure::new(0, 1, "Standard", dec("5000"));
        structure.components.push(SalaryComponent::fixed(
            "House Allowance",
            ComponentType::Earning,
            dec("1500"),
            1,
        ));
        let structure_id = store.insert_structure(structure, now()).unwrap();
        (store, employee_id, structure_id)
    }

    fn draft_detail(run_id: i64, employee_id: i64) -> PayrollDetail {
        PayrollDetail {
            id: 0,
            run_id,
            employee_id,
            gross_salary: dec("6500"),
            leave_deduction: Decimal::ZERO,
            benefit_deduction: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_salary: dec("6500"),
            working_days: None,
            days_worked: None,
            leave_days: Decimal::ZERO,
            status: DetailStatus::Draft,
            created_at: now(),
            updated_at: now(),
        }
    }

    // ==========================================================================
    // Assignments
    // ==========================================================================

    #[test]
    fn test_assign_salary_caches_gross_and_net() {
        let (mut store, employee_id, structure_id) = store_with_employee_and_structure();
        let id = store
            .assign_salary(employee_id, structure_id, date(2025, 1, 1), None, now())
            .unwrap();
        let assignment = store.assignment(id).unwrap();
        assert_eq!(assignment.gross_salary, dec("6500"));
        assert_eq!(assignment.net_salary, dec("6500"));
    }

    #[test]
    fn test_new_assignment_closes_exactly_one_prior_active() {
        let (mut store, employee_id, structure_id) = store_with_employee_and_structure();
        let first = store
            .assign_salary(employee_id, structure_id, date(2024, 1, 1), None, now())
            .unwrap();
        let second = store
            .assign_salary(
                employee_id,
                structure_id,
                date(2025, 1, 1),
                Some(dec("6000")),
                now(),
            )
            .unwrap();

        let first_assignment = store.assignment(first).unwrap();
        assert!(!first_assignment.is_active);
        assert!(first_assignment.end_date.is_some());

        let active = store.active_assignment(employee_id).unwrap();
        assert_eq!(active.id, second);
        assert!(active.end_date.is_none());
    }

    #[test]
    fn test_assign_salary_rejects_negative_override() {
        let (mut store, employee_id, structure_id) = store_with_employee_and_structure();
        let result = store.assign_salary(
            employee_id,
            structure_id,
            date(2025, 1, 1),
            Some(dec("-1")),
            now(),
        );
        assert!(matches!(
            result,
            Err(PayrollError::InvalidAssignment { .. })
        ));
    }

    #[test]
    fn test_assign_salary_requires_existing_entities() {
        let (mut store, employee_id, _) = store_with_employee_and_structure();
        assert!(matches!(
            store.assign_salary(employee_id, 999, date(2025, 1, 1), None, now()),
            Err(PayrollError::StructureNotFound { id: 999 })
        ));
        assert!(matches!(
            store.assign_salary(999, 1, date(2025, 1, 1), None, now()),
            Err(PayrollError::EmployeeNotFound { id: 999 })
        ));
    }

    // ==========================================================================
    // Structures
    // ==========================================================================

    #[test]
    fn test_insert_structure_validates_components() {
        let mut store = PayrollStore::new();
        let mut structure = SalaryStructure::new(0, 1, "Broken", dec("5000"));
        structure.components.push(SalaryComponent::percentage(
            "Too Much",
            ComponentType::Earning,
            dec("150"),
            1,
        ));
        assert!(store.insert_structure(structure, now()).is_err());
    }

    #[test]
    fn test_remove_structure_guarded_by_active_assignment() {
        let (mut store, employee_id, structure_id) = store_with_employee_and_structure();
        store
            .assign_salary(employee_id, structure_id, date(2025, 1, 1), None, now())
            .unwrap();
        assert!(matches!(
            store.remove_structure(structure_id),
            Err(PayrollError::StructureInUse { .. })
        ));

        let assignment_id = store.active_assignment(employee_id).unwrap().id;
        store.deactivate_assignment(assignment_id, now()).unwrap();
        assert!(store.remove_structure(structure_id).is_ok());
    }

    // ==========================================================================
    // Tax configuration selection
    // ==========================================================================

    #[test]
    fn test_active_tax_configuration_prefers_latest_year() {
        let mut store = PayrollStore::new();
        store
            .insert_tax_configuration(TaxConfiguration::new(0, 1, "Rules 2024", 2024), now())
            .unwrap();
        store
            .insert_tax_configuration(TaxConfiguration::new(0, 1, "Rules 2025", 2025), now())
            .unwrap();

        let active = store.active_tax_configuration(1).unwrap();
        assert_eq!(active.financial_year, 2025);
    }

    #[test]
    fn test_active_tax_configuration_ignores_other_organizations() {
        let mut store = PayrollStore::new();
        store
            .insert_tax_configuration(TaxConfiguration::new(0, 2, "Other Org", 2025), now())
            .unwrap();
        assert!(store.active_tax_configuration(1).is_none());
    }

    #[test]
    fn test_active_tax_configuration_skips_inactive() {
        let mut store = PayrollStore::new();
        let mut config = TaxConfiguration::new(0, 1, "Retired", 2025);
        config.is_active = false;
        store.insert_tax_configuration(config, now()).unwrap();
        assert!(store.active_tax_configuration(1).is_none());
    }

    // ==========================================================================
    // Runs and details
    // ==========================================================================

    #[test]
    fn test_create_run_rejects_overlapping_period() {
        let mut store = PayrollStore::new();
        let period = PayrollPeriod::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        store
            .create_run(1, "January", PayFrequency::Monthly, period, now())
            .unwrap();

        let overlapping = PayrollPeriod::new(date(2025, 1, 20), date(2025, 2, 19)).unwrap();
        assert!(matches!(
            store.create_run(1, "Overlap", PayFrequency::Monthly, overlapping, now()),
            Err(PayrollError::OverlappingRun { .. })
        ));

        // A different organization is unaffected
        assert!(
            store
                .create_run(2, "Other org", PayFrequency::Monthly, overlapping, now())
                .is_ok()
        );
    }

    #[test]
    fn test_cancelled_runs_do_not_block_new_periods() {
        let mut store = PayrollStore::new();
        let period = PayrollPeriod::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let run_id = store
            .create_run(1, "January", PayFrequency::Monthly, period, now())
            .unwrap();
        store
            .transition_run(run_id, RunStatus::Draft, RunStatus::Cancelled, now())
            .unwrap();

        assert!(
            store
                .create_run(1, "January again", PayFrequency::Monthly, period, now())
                .is_ok()
        );
    }

    #[test]
    fn test_transition_run_rejects_wrong_status() {
        let mut store = PayrollStore::new();
        let period = PayrollPeriod::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let run_id = store
            .create_run(1, "January", PayFrequency::Monthly, period, now())
            .unwrap();
        store
            .transition_run(run_id, RunStatus::Draft, RunStatus::Processed, now())
            .unwrap();

        let result = store.transition_run(run_id, RunStatus::Draft, RunStatus::Processed, now());
        assert!(matches!(
            result,
            Err(PayrollError::InvalidRunStatus {
                status: RunStatus::Processed,
                required: RunStatus::Draft,
                ..
            })
        ));
    }

    #[test]
    fn test_insert_detail_enforces_run_employee_uniqueness() {
        let mut store = PayrollStore::new();
        store.insert_detail(draft_detail(1, 2), now()).unwrap();
        assert!(matches!(
            store.insert_detail(draft_detail(1, 2), now()),
            Err(PayrollError::DuplicateDetail {
                run_id: 1,
                employee_id: 2,
            })
        ));
        // Same employee in another run is fine
        assert!(store.insert_detail(draft_detail(2, 2), now()).is_ok());
    }

    // ==========================================================================
    // Collaborator seams
    // ==========================================================================

    #[test]
    fn test_approved_leave_filters_status_and_overlap() {
        let mut store = PayrollStore::new();
        store.insert_leave_request(LeaveRequest::approved(0, 7, date(2025, 1, 6), date(2025, 1, 8)));
        let mut pending = LeaveRequest::approved(0, 7, date(2025, 1, 10), date(2025, 1, 12));
        pending.status = LeaveStatus::Pending;
        store.insert_leave_request(pending);
        store.insert_leave_request(LeaveRequest::approved(0, 7, date(2025, 3, 1), date(2025, 3, 2)));
        store.insert_leave_request(LeaveRequest::approved(0, 8, date(2025, 1, 6), date(2025, 1, 8)));

        let period = PayrollPeriod::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let requests = store.approved_leave(7, &period).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].start_date, date(2025, 1, 6));
    }

    #[test]
    fn test_active_enrollments_pairs_plans() {
        let mut store = PayrollStore::new();
        let plan_id = store.insert_benefit_plan(BenefitPlan::new(
            0,
            1,
            "Gold Health Plan",
            dec("150"),
            dec("300"),
        ));
        store.insert_enrollment(BenefitEnrollment::new(0, 7, plan_id, date(2024, 1, 1)));

        let pairs = store.active_enrollments(7, date(2025, 1, 31)).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1.name, "Gold Health Plan");
    }

    #[test]
    fn test_active_enrollments_missing_plan_is_source_error() {
        let mut store = PayrollStore::new();
        store.insert_enrollment(BenefitEnrollment::new(0, 7, 999, date(2024, 1, 1)));
        let result = store.active_enrollments(7, date(2025, 1, 31));
        assert!(matches!(
            result,
            Err(PayrollError::SourceUnavailable { .. })
        ));
    }
}
