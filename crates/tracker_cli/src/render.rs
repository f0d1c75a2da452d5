//! Plain-text output for CLI commands.

use chrono::NaiveDate;
use tracker_core::views::release::PLACEHOLDER;
use tracker_core::{DashboardMetrics, Milestone, Project, ReleaseRow, ResourceRecord};

pub fn projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("no projects");
        return;
    }
    for project in projects {
        println!(
            "{:>5}  {:<24}  {:<16}  {:<18}  {}",
            project.id,
            project.name,
            project.product,
            project.status,
            project.delivery_month.as_deref().unwrap_or(PLACEHOLDER)
        );
    }
}

pub fn project_detail(project: &Project, milestones: &[Milestone]) {
    let field = |value: Option<&str>| value.unwrap_or(PLACEHOLDER).to_string();

    println!("#{} {}", project.id, project.name);
    println!("  product:        {}", project.product);
    println!("  business owner: {}", field(project.business_owner.as_deref()));
    println!("  scrum master:   {}", field(project.scrum_master.as_deref()));
    println!("  platforms:      {}", field(project.platforms.as_deref()));
    println!("  go-live:        {}", date_or_placeholder(project.planned_go_live));
    println!("  status:         {}", project.status);
    println!("  delivery month: {}", field(project.delivery_month.as_deref()));
    println!("  notes:          {}", field(project.notes.as_deref()));
    println!("  submitted:      {}", project.created_at);
    println!("  milestones:");
    self::milestones(milestones);
}

pub fn milestones(milestones: &[Milestone]) {
    if milestones.is_empty() {
        println!("    none");
        return;
    }
    for milestone in milestones {
        let planned = date_or_placeholder(milestone.planned_date);
        let revised = date_or_placeholder(milestone.revised_date);
        let flag = if milestone.is_slipping() { "  SLIPPING" } else { "" };
        println!(
            "    {:>5}  {:<16}  planned {}  revised {}{}",
            milestone.id, milestone.milestone_type, planned, revised, flag
        );
        if let Some(reason) = milestone.delay_reason.as_deref() {
            println!("           reason: {reason}");
        }
    }
}

pub fn resources(resources: &[ResourceRecord]) {
    if resources.is_empty() {
        println!("no resources");
        return;
    }
    for resource in resources {
        let allocation = resource
            .allocation_pct
            .map_or_else(|| PLACEHOLDER.to_string(), |pct| format!("{pct}%"));
        println!(
            "{:>5}  {:<20}  {:<7}  {:<20}  {:<3}  {:>4}  {}",
            resource.id,
            resource.employee_name,
            resource.role,
            resource.project_name,
            resource.phase,
            allocation,
            resource.end_rule
        );
    }
}

pub fn release(month: &str, rows: &[ReleaseRow]) {
    println!("Release view: {month}");
    if rows.is_empty() {
        println!("no projects scheduled");
        return;
    }
    for row in rows {
        println!("- {} [{}]", row.project, row.status);
        println!("    stakeholders:  {}", row.stakeholders);
        println!("    scrum master:  {}", row.scrum_master);
        println!("    platforms:     {}", row.platforms);
        println!("    delivery date: {}", row.delivery_date);
        println!("    notes:         {}", row.notes);
    }
}

pub fn dashboard(month: Option<&str>, metrics: &DashboardMetrics) {
    println!("Dashboard: {}", month.unwrap_or("all months"));
    println!(
        "  projects {}  resources {}  active {}",
        metrics.total_projects, metrics.total_resources, metrics.active
    );
    println!("  on time {}  delayed {}", metrics.on_time, metrics.delayed);
    println!(
        "  in development {}  in QA {}  live {}",
        metrics.phases.in_development, metrics.phases.in_qa, metrics.phases.live
    );
    println!("  by status:");
    for entry in &metrics.status_counts {
        println!("    {:<18} {}", entry.status, entry.count);
    }
    println!("  recent:");
    for project in &metrics.recent {
        println!("    {:>5}  {}  ({})", project.id, project.name, project.status);
    }
}

fn date_or_placeholder(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| PLACEHOLDER.to_string(), |date| date.to_string())
}
