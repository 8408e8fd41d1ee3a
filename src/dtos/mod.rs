pub mod fixture_view;
