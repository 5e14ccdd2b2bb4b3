//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod analytics_repo;
pub mod certificate_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod gallery_repo;
pub mod leadership_repo;
pub mod lesson_repo;
pub mod magazine_repo;
pub mod news_repo;
pub mod payment_repo;
pub mod personnel_repo;
pub mod pg_program_repo;
pub mod profile_repo;
pub mod quiz_repo;
pub mod session_repo;
pub mod setting_repo;
pub mod student_category_repo;

pub use activity_repo::ActivityRepo;
pub use analytics_repo::AnalyticsRepo;
pub use certificate_repo::CertificateRepo;
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use gallery_repo::{GalleryPictureRepo, GalleryVideoRepo};
pub use leadership_repo::LeadershipRepo;
pub use lesson_repo::LessonRepo;
pub use magazine_repo::MagazineRepo;
pub use news_repo::NewsRepo;
pub use payment_repo::PaymentRepo;
pub use personnel_repo::PersonnelRepo;
pub use pg_program_repo::PgProgramRepo;
pub use profile_repo::ProfileRepo;
pub use quiz_repo::{QuizQuestionRepo, QuizRepo, QuizSubmissionRepo};
pub use session_repo::SessionRepo;
pub use setting_repo::SettingRepo;
pub use student_category_repo::StudentCategoryRepo;
