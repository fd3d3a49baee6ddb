mod availability_test;
mod catalog_test;
mod health_test;
mod routine_test;
