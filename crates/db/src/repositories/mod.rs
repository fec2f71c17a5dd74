pub mod activity_repo;
pub mod checkin_repo;
pub mod flush_repo;
pub mod game_repo;
pub mod order_repo;
pub mod player_repo;
pub mod points_repo;
pub mod seat_repo;
pub mod staff_repo;
pub mod table_repo;
pub mod tournament_repo;
pub mod waitlist_repo;

pub use activity_repo::ActivityLogRepo;
pub use checkin_repo::CheckinRepo;
pub use flush_repo::{FlushJackpotRepo, FlushProgressRepo};
pub use game_repo::GameRepo;
pub use order_repo::FoodOrderRepo;
pub use player_repo::PlayerRepo;
pub use points_repo::PointsTransactionRepo;
pub use seat_repo::SeatRepo;
pub use staff_repo::StaffRepo;
pub use table_repo::TableRepo;
pub use tournament_repo::{RegistrationRepo, TournamentRepo};
pub use waitlist_repo::WaitlistRepo;
