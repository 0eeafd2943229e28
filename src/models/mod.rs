pub mod form;
pub mod stats;
pub mod workout;

pub use form::WorkoutForm;
pub use stats::{
    CellDetail, ChartMetrics, HeatmapCell, ProgressPoint, StreakTier, Volume, WorkoutRating,
    WorkoutStats, YearStats,
};
pub use workout::{GetupWorkoutType, NewWorkout, SwingStyle, SwingWorkoutType, WorkoutRecord};
