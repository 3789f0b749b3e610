use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Transferred is terminal: such an enrollment is never reactivated
        db.execute_unprepared(
            "CREATE TYPE swim_school.enrollment_status AS ENUM \
             ('active', 'transferred', 'dropped', 'waitlisted')",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TYPE swim_school.attendance_status AS ENUM ('present', 'absent', 'excused')",
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.enrollments (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                student_id UUID NOT NULL REFERENCES swim_school.students(id) ON DELETE CASCADE,
                offering_id UUID NOT NULL REFERENCES swim_school.offerings(id) ON DELETE RESTRICT,
                status swim_school.enrollment_status NOT NULL DEFAULT 'active',
                enroll_date DATE NOT NULL DEFAULT CURRENT_DATE,
                class_ratio VARCHAR(50),
                transferred_from_id UUID REFERENCES swim_school.enrollments(id) ON DELETE SET NULL,
                transferred_to_id UUID REFERENCES swim_school.enrollments(id) ON DELETE SET NULL,
                transferred_at TIMESTAMPTZ,
                transfer_notes TEXT,
                remarks TEXT,
                created_by UUID REFERENCES swim_school.staff_users(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .await?;

        // A student holds at most one live binding per offering
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_enrollments_active_offering_student
             ON swim_school.enrollments(offering_id, student_id)
             WHERE status = 'active'",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_enrollments_student
             ON swim_school.enrollments(student_id)",
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.attendances (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                enrollment_id UUID NOT NULL REFERENCES swim_school.enrollments(id) ON DELETE CASCADE,
                class_session_id UUID NOT NULL REFERENCES swim_school.class_sessions(id) ON DELETE CASCADE,
                status swim_school.attendance_status NOT NULL,
                notes TEXT,
                marked_by UUID REFERENCES swim_school.staff_users(id) ON DELETE SET NULL,
                marked_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                UNIQUE(enrollment_id, class_session_id)
            )
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS swim_school.enrollment_skips (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                enrollment_id UUID NOT NULL REFERENCES swim_school.enrollments(id) ON DELETE CASCADE,
                class_session_id UUID NOT NULL REFERENCES swim_school.class_sessions(id) ON DELETE CASCADE,
                reason TEXT,
                created_by UUID REFERENCES swim_school.staff_users(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                UNIQUE(enrollment_id, class_session_id)
            )
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for table in ["enrollment_skips", "attendances", "enrollments"] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS swim_school.{table}"))
                .await?;
        }

        db.execute_unprepared("DROP TYPE IF EXISTS swim_school.attendance_status")
            .await?;
        db.execute_unprepared("DROP TYPE IF EXISTS swim_school.enrollment_status")
            .await?;

        Ok(())
    }
}
