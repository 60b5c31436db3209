//! Built-in course data installed into a fresh store.

use tracing::info;

use crate::entity::{Classroom, Problem, Student};
use crate::store::Store;

/// Demo accounts for trying the platform out of the box.
/// (id, name, username, password, student number)
const DEMO_STUDENTS: &[(&str, &str, &str, &str, &str)] = &[
    ("s1", "Alice", "alice", "password123", "2024001"),
    ("s2", "Bob", "bob", "password123", "2024002"),
    ("s3", "Charlie", "charlie", "password123", "2024003"),
    ("s4", "Diana", "diana", "password123", "2024004"),
];

/// (id, name, member student ids)
const DEMO_CLASSROOMS: &[(&str, &str, &[&str])] = &[
    ("c1", "Period 1 - Intro to Python", &["s1", "s2"]),
    ("c2", "Period 3 - Advanced Python", &["s3", "s4"]),
];

/// The exercise catalog: (id, title, description, function signature).
///
/// Titles and descriptions here are the English fallbacks; display
/// resolves the `problems.<id>.*` locale keys, which every catalog
/// entry carries.
const PROBLEM_CATALOG: &[(&str, &str, &str, &str)] = &[
    (
        "p1",
        "Hello, World!",
        "Write a Python function `greet()` that returns the string \"Hello, World!\".",
        "greet()",
    ),
    (
        "p2",
        "Sum of Two Numbers",
        "Write a Python function `sum_two(a, b)` that takes two numbers `a` and `b` as input and returns their sum.",
        "sum_two(a, b)",
    ),
    (
        "p3",
        "Subtract Two Numbers",
        "Write a Python function `subtract(a, b)` that takes two numbers `a` and `b` and returns their difference (a - b).",
        "subtract(a, b)",
    ),
    (
        "p4",
        "Multiply Two Numbers",
        "Write a Python function `multiply(a, b)` that returns the product of two numbers `a` and `b`.",
        "multiply(a, b)",
    ),
    (
        "p5",
        "Check for Even Number",
        "Write a function `is_even(number)` that returns `True` if the number is even, and `False` otherwise.",
        "is_even(number)",
    ),
    (
        "p6",
        "Find Maximum of Two",
        "Write a function `max_of_two(a, b)` that returns the larger of the two numbers.",
        "max_of_two(a, b)",
    ),
    (
        "p7",
        "String Length",
        "Write a function `get_string_length(s)` that returns the length of a given string `s`.",
        "get_string_length(s)",
    ),
    (
        "p8",
        "Reverse a String",
        "Write a function `reverse_string(s)` that takes a string `s` and returns the reversed string.",
        "reverse_string(s)",
    ),
    (
        "p9",
        "First Element of a List",
        "Write a function `get_first_element(lst)` that returns the first element of a list `lst`.",
        "get_first_element(lst)",
    ),
    (
        "p10",
        "Sum of List Elements",
        "Write a function `sum_list(numbers)` that returns the sum of all numbers in a list.",
        "sum_list(numbers)",
    ),
    (
        "p11",
        "Celsius to Fahrenheit",
        "Write a function `celsius_to_fahrenheit(celsius)` that converts Celsius to Fahrenheit. Formula: (C * 9/5) + 32.",
        "celsius_to_fahrenheit(celsius)",
    ),
    (
        "p12",
        "Count Vowels",
        "Write a function `count_vowels(s)` that counts the number of vowels (a, e, i, o, u) in a string.",
        "count_vowels(s)",
    ),
    (
        "p13",
        "Palindrome Check",
        "Write a function `is_palindrome(s)` that checks if a string is a palindrome (reads the same forwards and backwards).",
        "is_palindrome(s)",
    ),
    (
        "p14",
        "Factorial",
        "Write a function `factorial(n)` that computes the factorial of a non-negative integer `n`.",
        "factorial(n)",
    ),
    (
        "p15",
        "Find in List",
        "Write a function `find_element(lst, element)` that returns `True` if the element is in the list, `False` otherwise.",
        "find_element(lst, element)",
    ),
    (
        "p16",
        "Average of List",
        "Write a function `calculate_average(numbers)` that returns the average of a list of numbers.",
        "calculate_average(numbers)",
    ),
    (
        "p17",
        "String to Uppercase",
        "Write a function `to_uppercase(s)` that converts a string to uppercase.",
        "to_uppercase(s)",
    ),
    (
        "p18",
        "Area of Circle",
        "Write a function `circle_area(radius)` that calculates the area of a circle. Use `3.14159` for pi.",
        "circle_area(radius)",
    ),
    (
        "p19",
        "Check for Substring",
        "Write a function `contains_substring(main_str, sub_str)` that returns `True` if `main_str` contains `sub_str`.",
        "contains_substring(main_str, sub_str)",
    ),
    (
        "p20",
        "FizzBuzz",
        "Write a function `fizzbuzz(n)` that returns \"Fizz\" if n is divisible by 3, \"Buzz\" if by 5, \"FizzBuzz\" if by both, and the number itself otherwise.",
        "fizzbuzz(n)",
    ),
    (
        "p21",
        "Get Dictionary Value",
        "Write a function `get_value(d, key)` that returns the value for a given key in a dictionary `d`.",
        "get_value(d, key)",
    ),
    (
        "p22",
        "Merge Lists",
        "Write a function `merge_lists(list1, list2)` that merges two lists into one.",
        "merge_lists(list1, list2)",
    ),
    (
        "p23",
        "Remove Duplicates",
        "Write a function `remove_duplicates(lst)` that removes duplicate elements from a list and returns a new list.",
        "remove_duplicates(lst)",
    ),
    (
        "p24",
        "Check if Key Exists",
        "Write a function `key_exists(d, key)` that returns `True` if a key exists in a dictionary `d`.",
        "key_exists(d, key)",
    ),
    (
        "p25",
        "Power of a Number",
        "Write a function `power(base, exp)` that calculates `base` to the power of `exp`.",
        "power(base, exp)",
    ),
    (
        "p26",
        "Generate Numbers",
        "Write a function `generate_numbers(n)` that returns a list of integers from 1 to `n`.",
        "generate_numbers(n)",
    ),
    (
        "p27",
        "Find Minimum in List",
        "Write a function `find_min(numbers)` that finds the minimum value in a list of numbers.",
        "find_min(numbers)",
    ),
    (
        "p28",
        "Absolute Value",
        "Write a function `absolute_value(num)` that returns the absolute value of a number.",
        "absolute_value(num)",
    ),
    (
        "p29",
        "Count Words in String",
        "Write a function `count_words(s)` that returns the number of words in a string `s`. Words are separated by spaces.",
        "count_words(s)",
    ),
    (
        "p30",
        "Create a Dictionary",
        "Write a function `create_dictionary(keys, values)` that creates a dictionary from two lists.",
        "create_dictionary(keys, values)",
    ),
    (
        "p31",
        "List to String",
        "Write a function `list_to_string(char_list, separator)` that joins a list of characters with a separator.",
        "list_to_string(char_list, separator)",
    ),
    (
        "p32",
        "Is Positive",
        "Write a function `is_positive(num)` that returns `True` if a number is greater than 0.",
        "is_positive(num)",
    ),
];

pub fn initial_students() -> Vec<Student> {
    DEMO_STUDENTS
        .iter()
        .map(|&(id, name, username, password, number)| Student {
            id: id.to_string(),
            name: name.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            student_number: Some(number.to_string()),
        })
        .collect()
}

pub fn initial_classrooms() -> Vec<Classroom> {
    DEMO_CLASSROOMS
        .iter()
        .map(|&(id, name, member_ids)| Classroom {
            id: id.to_string(),
            name: name.to_string(),
            student_ids: member_ids.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

pub fn initial_problems() -> Vec<Problem> {
    PROBLEM_CATALOG
        .iter()
        .map(|&(id, title, description, signature)| Problem {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            title_key: Some(format!("problems.{id}.title")),
            description_key: Some(format!("problems.{id}.description")),
            hint_key: Some(format!("problems.{id}.hint")),
            hint: None,
            initial_code: format!("def {signature}:\n  # Your code here\n  pass"),
        })
        .collect()
}

/// Install the built-in course data into `store`.
pub fn apply(store: &mut Store) {
    let students = initial_students();
    let classrooms = initial_classrooms();
    let problems = initial_problems();
    info!(
        students = students.len(),
        classrooms = classrooms.len(),
        problems = problems.len(),
        "seeded course data"
    );
    store.preload(students, classrooms, problems);
}
