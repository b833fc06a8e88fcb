use super::{ApiClient, ClientError, Notice, Outcome, SessionStore, View};
use crate::models::{Student, StudentStatus};
use crate::schema::CreateStudentRequest;
use crate::validators::is_email_valid;

/// The add-student form. A fresh form has status `active`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub course: String,
    pub status: StudentStatus,
}

impl StudentForm {
    fn to_request(&self) -> CreateStudentRequest {
        CreateStudentRequest {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            course: Some(self.course.trim().to_string()),
            status: Some(self.status.to_string()),
        }
    }
}

/// Student list plus the add-student form.
///
/// The list is fetched when the view is mounted and again after each
/// successful create, never in response to the list changing.
#[derive(Debug, Default)]
pub struct Dashboard {
    students: Vec<Student>,
    pub form: StudentForm,
    mounted: bool,
    fetches: usize,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// How many times the list has been requested.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Initial fetch. Mounting twice does not fetch twice.
    pub async fn mount(&mut self, api: &ApiClient) -> Outcome {
        if self.mounted {
            return Outcome::default();
        }
        self.mounted = true;

        match self.refresh(api).await {
            Ok(()) => Outcome::default(),
            Err(e) => failure(e),
        }
    }

    async fn refresh(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.fetches += 1;
        self.students = api.list_students().await?;
        tracing::debug!(count = self.students.len(), "Fetched students");
        Ok(())
    }

    pub async fn add_student(&mut self, api: &ApiClient) -> Outcome {
        let form = &self.form;
        if form.name.trim().is_empty()
            || form.email.trim().is_empty()
            || form.course.trim().is_empty()
        {
            return Outcome::notice(Notice::warning("All fields are required"));
        }
        if !is_email_valid(form.email.trim()) {
            return Outcome::notice(Notice::warning("Please enter a valid email address"));
        }

        let student = match api.create_student(&form.to_request()).await {
            Ok(student) => student,
            Err(e) => return failure(e),
        };

        self.form = StudentForm::default();
        if let Err(e) = self.refresh(api).await {
            return failure(e);
        }

        Outcome::notice(Notice::success(format!("Added {}", student.name)))
    }

    /// Forgets the stored token and leaves for the login view.
    pub fn logout(&mut self, api: &mut ApiClient, session: &SessionStore) -> Outcome {
        api.set_token(None);
        self.students.clear();
        self.mounted = false;

        match session.clear() {
            Ok(()) => Outcome::notice(Notice::success("Logged out")).navigate(View::Login),
            Err(e) => Outcome::notice(Notice::error(e.to_string())).navigate(View::Login),
        }
    }

    /// Plain-text table with columns Name, Email, Course, Status.
    pub fn render_table(&self) -> String {
        render_students(&self.students)
    }
}

/// Error notice; a rejected session also sends the user back to login.
fn failure(err: ClientError) -> Outcome {
    let outcome = Outcome::notice(Notice::error(err.to_string()));
    if err.is_unauthorized() {
        outcome.navigate(View::Login)
    } else {
        outcome
    }
}

fn render_students(students: &[Student]) -> String {
    const HEADERS: [&str; 4] = ["Name", "Email", "Course", "Status"];

    let rows: Vec<[&str; 4]> = students
        .iter()
        .map(|s| [s.name.as_str(), s.email.as_str(), s.course.as_str(), s.status.as_str()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str; 4]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(&HEADERS);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no students)\n");
    }
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }

    out
}
