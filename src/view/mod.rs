pub mod file_tree;
