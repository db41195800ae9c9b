use crate::DbError;
use core_types::{NewStudent, Student, UniqueField};
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::Transaction;

const STUDENT_COLUMNS: &str = "id, name, roll_no, email, age";

/// The `StudentRepository` owns the `students` table. It encapsulates all SQL
/// and wraps every write in its own transaction.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    /// Creates a new `StudentRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new student and returns it with its assigned id.
    pub async fn create(&self, student: &NewStudent) -> Result<Student, DbError> {
        let mut tx: Transaction<Sqlite> = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (name, roll_no, email, age) VALUES (?, ?, ?, ?) RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&student.name)
        .bind(&student.roll_no)
        .bind(&student.email)
        .bind(student.age)
        .fetch_one(&mut *tx) // Note: must use the transaction object `tx` here
        .await
        .map_err(DbError::from_write)?;

        tx.commit().await?;
        tracing::debug!(id = created.id, roll_no = %created.roll_no, "Inserted student row.");
        Ok(created)
    }

    /// Fetches a single student by id.
    pub async fn get(&self, id: i64) -> Result<Student, DbError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    /// Fetches every student in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    /// Finds the student holding `value` in a unique column, ignoring the row
    /// `exclude_id` when given so that an update does not collide with itself.
    pub async fn find_by(
        &self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Student>, DbError> {
        let column = field.column();
        let student = match exclude_id {
            Some(id) => {
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students WHERE {column} = ? AND id != ? LIMIT 1"
                ))
                .bind(value)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students WHERE {column} = ? LIMIT 1"
                ))
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(student)
    }

    /// Overwrites all four fields of an existing student in one transaction.
    ///
    /// Any early return drops `tx` uncommitted, which rolls it back.
    pub async fn update(&self, id: i64, student: &NewStudent) -> Result<Student, DbError> {
        let mut tx: Transaction<Sqlite> = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET name = ?, roll_no = ?, email = ?, age = ? WHERE id = ? RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&student.name)
        .bind(&student.roll_no)
        .bind(&student.email)
        .bind(student.age)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::from_write)?
        .ok_or(DbError::NotFound)?;

        tx.commit().await?;
        tracing::debug!(id, "Updated student row.");
        Ok(updated)
    }

    /// Removes a student. Deleting an id that no longer exists is `NotFound`.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx: Transaction<Sqlite> = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        tx.commit().await?;
        tracing::debug!(id, "Deleted student row.");
        Ok(())
    }

    /// Returns the number of stored students.
    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect_in_memory;

    async fn repo() -> StudentRepository {
        StudentRepository::new(connect_in_memory().await.unwrap())
    }

    fn new_student(name: &str, roll_no: &str, email: &str, age: i64) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_lists_in_insertion_order() {
        let repo = repo().await;
        let ann = repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();
        let bob = repo.create(&new_student("Bob", "R2", "bob@x.com", 22)).await.unwrap();

        assert!(bob.id > ann.id);
        let all = repo.list_all().await.unwrap();
        assert_eq!(all, vec![ann.clone(), bob]);
        assert_eq!(repo.get(ann.id).await.unwrap(), ann);
    }

    #[tokio::test]
    async fn get_missing_id_is_not_found() {
        let repo = repo().await;
        assert!(matches!(repo.get(42).await, Err(DbError::NotFound)));
    }

    #[tokio::test]
    async fn duplicate_roll_no_is_a_constraint_violation_and_leaves_store_unchanged() {
        let repo = repo().await;
        repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();

        let err = repo
            .create(&new_student("Other", "R1", "other@x.com", 30))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_collision_rolls_back() {
        let repo = repo().await;
        repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();
        let bob = repo.create(&new_student("Bob", "R2", "bob@x.com", 22)).await.unwrap();

        let err = repo
            .update(bob.id, &new_student("Bob", "R2", "ann@x.com", 23))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation(_)));
        assert_eq!(repo.get(bob.id).await.unwrap(), bob);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let repo = repo().await;
        let ann = repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();

        let updated = repo
            .update(ann.id, &new_student("Anne", "R9", "anne@x.com", 21))
            .await
            .unwrap();
        assert_eq!(updated.id, ann.id);
        assert_eq!(updated.name, "Anne");
        assert_eq!(updated.roll_no, "R9");
        assert_eq!(updated.email, "anne@x.com");
        assert_eq!(updated.age, 21);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update(7, &new_student("Ann", "R1", "ann@x.com", 20))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let repo = repo().await;
        let ann = repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();
        let bob = repo.create(&new_student("Bob", "R2", "bob@x.com", 22)).await.unwrap();

        repo.delete(ann.id).await.unwrap();
        assert!(matches!(repo.delete(ann.id).await, Err(DbError::NotFound)));
        assert_eq!(repo.list_all().await.unwrap(), vec![bob]);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reissued() {
        let repo = repo().await;
        let ann = repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();
        repo.delete(ann.id).await.unwrap();

        let again = repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();
        assert!(again.id > ann.id);
    }

    #[tokio::test]
    async fn find_by_respects_exclusion() {
        let repo = repo().await;
        let ann = repo.create(&new_student("Ann", "R1", "ann@x.com", 20)).await.unwrap();

        let found = repo.find_by(UniqueField::RollNo, "R1", None).await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(ann.id));

        let excluded = repo
            .find_by(UniqueField::Email, "ann@x.com", Some(ann.id))
            .await
            .unwrap();
        assert!(excluded.is_none());

        let missing = repo.find_by(UniqueField::Email, "nobody@x.com", None).await.unwrap();
        assert!(missing.is_none());
    }
}
