use crate::entities::{batch, employee, lead};
use crate::error::{ServiceError, ServiceResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: String,
}

pub struct EmployeeService;

impl EmployeeService {
    pub async fn create_employee(
        db: &DatabaseConnection,
        request: CreateEmployee,
    ) -> ServiceResult<employee::Model> {
        if request.employee_code.trim().is_empty() {
            return Err(ServiceError::Validation("employee code is required".to_string()));
        }
        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "first and last name are required".to_string(),
            ));
        }

        let duplicates = employee::Entity::find()
            .filter(
                Condition::any()
                    .add(employee::Column::EmployeeCode.eq(&request.employee_code))
                    .add(employee::Column::Email.eq(&request.email)),
            )
            .count(db)
            .await?;
        if duplicates > 0 {
            return Err(ServiceError::Conflict(format!(
                "employee with code {} or email {} already exists",
                request.employee_code, request.email
            )));
        }

        let now = Utc::now().naive_utc();
        let new_employee = employee::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_code: Set(request.employee_code),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            email: Set(request.email),
            phone: Set(request.phone),
            department: Set(request.department),
            role: Set(request.role),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(new_employee.insert(db).await?)
    }

    pub async fn get_employee(db: &DatabaseConnection, id: Uuid) -> ServiceResult<employee::Model> {
        employee::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee", id))
    }

    pub async fn list_employees(
        db: &DatabaseConnection,
        department: Option<String>,
        page: u64,
        per_page: u64,
    ) -> ServiceResult<(Vec<employee::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(department) = department {
            condition = condition.add(employee::Column::Department.eq(department));
        }

        let query = employee::Entity::find()
            .filter(condition)
            .order_by_asc(employee::Column::EmployeeCode);

        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let employees = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((employees, total_items))
    }

    /// An employee still instructing batches or holding leads cannot be
    /// removed
    pub async fn delete_employee(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let employee = Self::get_employee(db, id).await?;

        let instructed = batch::Entity::find()
            .filter(batch::Column::InstructorId.eq(id))
            .count(db)
            .await?;
        let assigned = lead::Entity::find()
            .filter(lead::Column::AssignedCounsellorId.eq(id))
            .count(db)
            .await?;
        if instructed > 0 || assigned > 0 {
            return Err(ServiceError::Conflict(format!(
                "employee {} still has {instructed} batches and {assigned} leads assigned",
                employee.employee_code
            )));
        }

        employee::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
