/// Student Routes
///
/// The roster is shared: every authenticated user lists and adds to the same
/// set of students.

use actix_web::{web, HttpResponse};

use crate::auth::Claims;
use crate::error::AppError;
use crate::schema::CreateStudentRequest;
use crate::store::StudentStore;

/// GET /api/students
pub async fn list_students(
    students: web::Data<dyn StudentStore>,
) -> Result<HttpResponse, AppError> {
    let students = students.list().await?;
    Ok(HttpResponse::Ok().json(students))
}

/// POST /api/students
///
/// # Errors
/// - 400: Missing field, malformed email, unknown status
/// - 409: A student with this email already exists
pub async fn create_student(
    form: web::Json<CreateStudentRequest>,
    students: web::Data<dyn StudentStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let new_student = form.validate()?;
    let student = students.insert(new_student).await?;

    tracing::info!(
        student_id = %student.id,
        created_by = %claims.sub,
        "Student created successfully"
    );

    Ok(HttpResponse::Created().json(student))
}
