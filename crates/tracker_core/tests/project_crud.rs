use chrono::NaiveDate;
use rusqlite::Connection;
use tracker_core::db::open_db_in_memory;
use tracker_core::{
    EntityKind, NewProject, ProjectListQuery, ProjectRepository, ProjectStatus, RepoError,
    SqliteProjectRepository, ValidationError,
};

fn project(name: &str, product: &str, month: &str, status: ProjectStatus) -> NewProject {
    NewProject {
        status,
        delivery_month: Some(month.to_string()),
        ..NewProject::new(name, product)
    }
}

fn names(projects: &[tracker_core::Project]) -> Vec<&str> {
    projects.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    let input = NewProject {
        business_owner: Some("Dana".to_string()),
        scrum_master: Some("Sam".to_string()),
        platforms: Some("iOS, Android".to_string()),
        planned_go_live: NaiveDate::from_ymd_opt(2026, 3, 20),
        delivery_month: Some("Mar 2026".to_string()),
        notes: Some("kickoff done".to_string()),
        ..NewProject::new("Alpha", "ProductX")
    };
    let id = repo.create_project(&input).unwrap();

    let loaded = repo.get_project(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Alpha");
    assert_eq!(loaded.product, "ProductX");
    assert_eq!(loaded.business_owner.as_deref(), Some("Dana"));
    assert_eq!(loaded.platforms.as_deref(), Some("iOS, Android"));
    assert_eq!(loaded.planned_go_live, NaiveDate::from_ymd_opt(2026, 3, 20));
    assert_eq!(loaded.status, ProjectStatus::NewRequest);
    assert_eq!(loaded.delivery_month.as_deref(), Some("Mar 2026"));
    assert_eq!(loaded.notes.as_deref(), Some("kickoff done"));
}

#[test]
fn get_missing_project_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    assert!(repo.get_project(404).unwrap().is_none());
}

#[test]
fn create_rejects_missing_required_fields_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    let err = repo.create_project(&NewProject::new("", "ProductX")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingField("project name"))
    ));

    let err = repo.create_project(&NewProject::new("Alpha", "   ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingField("product"))
    ));

    assert_eq!(project_count(&conn), 0);
}

#[test]
fn list_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    for name in ["first", "second", "third"] {
        repo.create_project(&NewProject::new(name, "P")).unwrap();
    }

    let listed = repo.list_projects(&ProjectListQuery::default()).unwrap();
    assert_eq!(names(&listed), vec!["third", "second", "first"]);
}

#[test]
fn list_filters_are_conjunctive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    repo.create_project(&project("a", "ProductX", "Mar 2026", ProjectStatus::GoLive))
        .unwrap();
    repo.create_project(&project("b", "ProductX", "Mar 2026", ProjectStatus::Delayed))
        .unwrap();
    repo.create_project(&project("c", "ProductX", "Apr 2026", ProjectStatus::GoLive))
        .unwrap();
    repo.create_project(&project("d", "Other", "Mar 2026", ProjectStatus::GoLive))
        .unwrap();

    let month_and_status = ProjectListQuery {
        delivery_month: Some("Mar 2026".to_string()),
        statuses: vec![ProjectStatus::GoLive],
        ..ProjectListQuery::default()
    };
    let listed = repo.list_projects(&month_and_status).unwrap();
    assert_eq!(names(&listed), vec!["d", "a"]);

    let all_three = ProjectListQuery {
        product_contains: Some("productx".to_string()),
        ..month_and_status
    };
    let listed = repo.list_projects(&all_three).unwrap();
    assert_eq!(names(&listed), vec!["a"]);
}

#[test]
fn list_status_filter_matches_any_of_set() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    repo.create_project(&project("a", "P", "Mar 2026", ProjectStatus::InDevelopment))
        .unwrap();
    repo.create_project(&project("b", "P", "Mar 2026", ProjectStatus::QaEnd))
        .unwrap();
    repo.create_project(&project("c", "P", "Mar 2026", ProjectStatus::Brainstorming))
        .unwrap();

    let query = ProjectListQuery {
        statuses: vec![ProjectStatus::InDevelopment, ProjectStatus::QaEnd],
        ..ProjectListQuery::default()
    };
    let listed = repo.list_projects(&query).unwrap();
    assert_eq!(names(&listed), vec!["b", "a"]);
}

#[test]
fn product_filter_is_substring_and_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    repo.create_project(&NewProject::new("a", "Payments 100%")).unwrap();
    repo.create_project(&NewProject::new("b", "Payments Core")).unwrap();

    let substring = ProjectListQuery {
        product_contains: Some("ments".to_string()),
        ..ProjectListQuery::default()
    };
    assert_eq!(repo.list_projects(&substring).unwrap().len(), 2);

    let literal_percent = ProjectListQuery {
        product_contains: Some("100%".to_string()),
        ..ProjectListQuery::default()
    };
    assert_eq!(names(&repo.list_projects(&literal_percent).unwrap()), vec!["a"]);

    let empty = ProjectListQuery {
        product_contains: Some(String::new()),
        ..ProjectListQuery::default()
    };
    assert_eq!(repo.list_projects(&empty).unwrap().len(), 2);
}

#[test]
fn update_status_and_notes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    let id = repo.create_project(&NewProject::new("Alpha", "ProductX")).unwrap();

    repo.update_status(id, ProjectStatus::GoLive).unwrap();
    repo.update_status(id, ProjectStatus::Brainstorming).unwrap();
    repo.update_notes(id, Some("blocked on vendor")).unwrap();

    let loaded = repo.get_project(id).unwrap().unwrap();
    assert_eq!(loaded.status, ProjectStatus::Brainstorming);
    assert_eq!(loaded.notes.as_deref(), Some("blocked on vendor"));

    repo.update_notes(id, Some("  ")).unwrap();
    assert_eq!(repo.get_project(id).unwrap().unwrap().notes, None);
}

#[test]
fn mutations_on_missing_project_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    let err = repo.update_status(9, ProjectStatus::Delayed).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Project,
            id: 9
        }
    ));
    assert!(matches!(
        repo.update_notes(9, Some("x")).unwrap_err(),
        RepoError::NotFound { .. }
    ));
    assert!(matches!(
        repo.delete_project(9).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn list_project_names_is_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    let zeta = repo.create_project(&NewProject::new("Zeta", "P")).unwrap();
    let alpha = repo.create_project(&NewProject::new("Alpha", "P")).unwrap();

    let listed = repo.list_project_names().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!((listed[0].id, listed[0].name.as_str()), (alpha, "Alpha"));
    assert_eq!((listed[1].id, listed[1].name.as_str()), (zeta, "Zeta"));
}

#[test]
fn null_legacy_status_reads_as_new_request_and_unknown_status_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO projects (name, product, status) VALUES ('old', 'P', NULL);",
        [],
    )
    .unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    let listed = repo.list_projects(&ProjectListQuery::default()).unwrap();
    assert_eq!(listed[0].status, ProjectStatus::NewRequest);

    conn.execute(
        "INSERT INTO projects (name, product, status) VALUES ('bad', 'P', 'Cancelled');",
        [],
    )
    .unwrap();
    let err = repo.list_projects(&ProjectListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let result = SqliteProjectRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::InvalidData(_))));
}

fn project_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap()
}
