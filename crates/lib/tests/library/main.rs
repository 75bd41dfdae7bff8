mod install_tests;
