pub mod course;
pub mod university;
pub mod user;

pub use course::{
    CourseDetail, CourseFormat, CourseLevel, CourseSummary, FeesType, NewCourseRequest,
    UpdateCourseRequest,
};
pub use university::{NewUniversityRequest, University, UpdateUniversityRequest};
pub use user::{
    AuthResponse, CompareRequest, Comparison, LoginRequest, RegisterRequest, SaveCourseRequest,
    SavedCourseEntry, User, UserProfile,
};
