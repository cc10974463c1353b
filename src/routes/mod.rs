/// 构建挂载了存储与参数错误处理器的测试应用
#[cfg(test)]
macro_rules! init_test_app {
    ($storage:expr, $configure:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($storage.shared()))
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler($crate::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler($crate::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::PathConfig::default()
                        .error_handler($crate::utils::path_error_handler),
                )
                .configure($configure),
        )
        .await
    };
}

pub mod evaluations;

pub mod majors;

pub mod users;

pub use evaluations::configure_evaluation_routes;
pub use majors::configure_major_routes;
pub use users::configure_user_routes;
