//! services/api/src/seed.rs
//!
//! Hand-authored catalog entries used to fabricate the course, module and exercise
//! collections written by the `seed_catalog` binary.

use course_studio_core::{
    catalog::Catalog,
    domain::{normalize_hours, Course, Exercise, ExerciseCategory, GenerationType, Module},
};
use serde::Serialize;

const KAGGLE_SOURCE: &str = "Kaggle Learn";
const PYTHON_DOCS_SOURCE: &str = "Python Documentation";

struct Lesson {
    title: &'static str,
    duration: &'static str,
    concepts: &'static str,
}

struct LearnCourse {
    title: &'static str,
    description: &'static str,
    total_duration: &'static str,
    level: &'static str,
    prerequisites: &'static str,
    lessons: &'static [Lesson],
}

struct Function {
    name: &'static str,
    description: &'static str,
    example: &'static str,
    level: &'static str,
}

struct ReferenceModule {
    module: &'static str,
    functions: &'static [Function],
}

const fn lesson(title: &'static str, duration: &'static str, concepts: &'static str) -> Lesson {
    Lesson { title, duration, concepts }
}

const fn function(
    name: &'static str,
    description: &'static str,
    example: &'static str,
    level: &'static str,
) -> Function {
    Function { name, description, example, level }
}

const LEARN_COURSES: &[LearnCourse] = &[
    LearnCourse {
        title: "Python",
        description: "Learn the most important language for data science",
        total_duration: "8h",
        level: "Beginner",
        prerequisites: "None",
        lessons: &[
            lesson("Hello, Python", "1h", "Variables, calling functions, help()"),
            lesson("Functions and Getting Help", "1h", "Defining functions, default arguments, help"),
            lesson("Booleans and Conditionals", "1h", "Boolean logic, if/elif/else, comparison operators"),
            lesson("Lists", "1h", "List creation, indexing, slicing, methods"),
            lesson("Loops and List Comprehensions", "1.5h", "for loops, while loops, list comprehensions"),
            lesson("Strings and Dictionaries", "1.5h", "String methods, dictionaries, key-value pairs"),
            lesson("Working with External Libraries", "1h", "import, math, numpy basics"),
        ],
    },
    LearnCourse {
        title: "Pandas",
        description: "Solve real-world data science problems with Python Pandas",
        total_duration: "6h",
        level: "Intermediate",
        prerequisites: "Python basics",
        lessons: &[
            lesson("Creating, Reading and Writing", "1h", "DataFrames, Series, reading CSV/JSON"),
            lesson("Indexing, Selecting & Assigning", "1h", "loc, iloc, conditional selection"),
            lesson("Summary Functions and Maps", "1h", "describe(), map(), apply()"),
            lesson("Grouping and Sorting", "1h", "groupby(), value_counts(), sort_values()"),
            lesson("Data Types and Missing Values", "1h", "dtypes, isnull(), fillna(), replace()"),
            lesson("Renaming and Combining", "1h", "rename(), concat(), join(), merge()"),
        ],
    },
    LearnCourse {
        title: "Data Visualization",
        description: "Make great data visualizations",
        total_duration: "6h",
        level: "Intermediate",
        prerequisites: "Python, Pandas",
        lessons: &[
            lesson("Hello, Seaborn", "1h", "Basic plots, trends, patterns"),
            lesson("Line Charts", "1h", "Temporal data, multiple lines, styling"),
            lesson("Bar Charts and Heatmaps", "1h", "Categorical data, correlation matrices"),
            lesson("Scatter Plots", "1h", "Relationships, color coding, regression"),
            lesson("Distributions", "1h", "Histograms, density plots, box plots"),
            lesson("Choosing Plot Types and Custom Styles", "1h", "Plot selection, themes, colors"),
        ],
    },
    LearnCourse {
        title: "Intro to Machine Learning",
        description: "Learn the core ideas in machine learning",
        total_duration: "9h",
        level: "Intermediate",
        prerequisites: "Python, Pandas",
        lessons: &[
            lesson("How Models Work", "1h", "Decision trees, prediction, model fitting"),
            lesson("Basic Data Exploration", "1h", "Data loading, describe(), head()"),
            lesson("Your First Machine Learning Model", "1.5h", "scikit-learn, fit(), predict()"),
            lesson("Model Validation", "1.5h", "train/test split, MAE, validation"),
            lesson("Underfitting and Overfitting", "1.5h", "Model complexity, validation curves"),
            lesson("Random Forests", "1.5h", "Ensemble methods, feature importance"),
            lesson("Machine Learning Competitions", "1h", "Kaggle competitions, submissions"),
        ],
    },
    LearnCourse {
        title: "Intro to SQL",
        description: "Learn SQL for working with databases",
        total_duration: "7.5h",
        level: "Beginner",
        prerequisites: "None",
        lessons: &[
            lesson("Getting Started With SQL and BigQuery", "1h", "SELECT, FROM, basic queries"),
            lesson("Select, From & Where", "1h", "Filtering, WHERE clauses, conditions"),
            lesson("Group By, Having & Count", "1.5h", "Aggregation, GROUP BY, COUNT, SUM"),
            lesson("Order By", "1h", "Sorting results, ASC/DESC"),
            lesson("As & With", "1h", "Aliases, CTEs, readable queries"),
            lesson("Joining Data", "2h", "INNER JOIN, LEFT JOIN, table relationships"),
        ],
    },
];

const REFERENCE_MODULES: &[ReferenceModule] = &[
    ReferenceModule {
        module: "Built-in Functions",
        functions: &[
            function("print()", "Display output to console", r#"print("Hello World")"#, "Beginner"),
            function("len()", "Return length of object", "len([1, 2, 3])", "Beginner"),
            function("type()", "Return type of object", "type(42)", "Beginner"),
            function("range()", "Generate sequence of numbers", "range(0, 10, 2)", "Beginner"),
            function("enumerate()", "Add counter to iterable", r#"enumerate(["a", "b"])"#, "Intermediate"),
            function("zip()", "Combine multiple iterables", r#"zip([1, 2], ["a", "b"])"#, "Intermediate"),
            function("map()", "Apply function to iterable", r#"map(str.upper, ["a", "b"])"#, "Advanced"),
            function("filter()", "Filter elements from iterable", "filter(lambda x: x > 0, [-1, 1, 2])", "Advanced"),
        ],
    },
    ReferenceModule {
        module: "String Methods",
        functions: &[
            function("str.upper()", "Convert to uppercase", r#""hello".upper()"#, "Beginner"),
            function("str.lower()", "Convert to lowercase", r#""HELLO".lower()"#, "Beginner"),
            function("str.split()", "Split string into list", r#""a,b,c".split(",")"#, "Beginner"),
            function("str.join()", "Join list into string", r#"",".join(["a", "b"])"#, "Intermediate"),
            function("str.replace()", "Replace substring", r#""hello".replace("l", "x")"#, "Beginner"),
            function("str.find()", "Find substring position", r#""hello".find("ll")"#, "Intermediate"),
        ],
    },
    ReferenceModule {
        module: "List Methods",
        functions: &[
            function("list.append()", "Add element to end", "lst = [1, 2]; lst.append(3)", "Beginner"),
            function("list.extend()", "Add multiple elements", "lst.extend([4, 5])", "Beginner"),
            function("list.insert()", "Insert at specific position", r#"lst.insert(1, "new")"#, "Intermediate"),
            function("list.remove()", "Remove first occurrence", r#"lst.remove("item")"#, "Beginner"),
            function("list.pop()", "Remove and return element", "lst.pop(0)", "Intermediate"),
            function("list.sort()", "Sort list in place", "lst.sort(reverse=True)", "Intermediate"),
        ],
    },
];

/// A ready-made request a client can offer as a one-click starting point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExampleRequest {
    pub label: &'static str,
    pub generation_type: GenerationType,
    pub domain: Option<&'static str>,
    pub request: &'static str,
}

pub const EXAMPLE_REQUESTS: [ExampleRequest; 3] = [
    ExampleRequest {
        label: "Kaggle Python course",
        generation_type: GenerationType::FullCourse,
        domain: Some("Data Science"),
        request: "Generate a complete Python course from the Kaggle Learn data, with all the real modules and exercises",
    },
    ExampleRequest {
        label: "Pandas training",
        generation_type: GenerationType::FullCourse,
        domain: Some("Data Science"),
        request: "Build a Pandas training using the real modules and exercises from the catalog",
    },
    ExampleRequest {
        label: "Machine learning quiz",
        generation_type: GenerationType::InteractiveQuiz,
        domain: Some("Data Science"),
        request: "Generate a quiz on machine learning based on the collected Kaggle lessons",
    },
];

/// Reference modules are taught as short beginner courses.
const REFERENCE_COURSE_HOURS: f64 = 4.0;
const REFERENCE_FUNCTION_MINUTES: u32 = 30;

/// Converts a lesson duration like `"1.5h"` into whole minutes.
fn lesson_minutes(duration: &str) -> u32 {
    normalize_hours(duration)
        .map(|hours| (hours * 60.0).round() as u32)
        .unwrap_or(0)
}

fn practice_exercises() -> Vec<ExerciseCategory> {
    vec![
        ExerciseCategory {
            category: "Python Basics".to_string(),
            level: "Beginner".to_string(),
            exercises: vec![
                Exercise {
                    title: "Calculator Function".to_string(),
                    description: "Create a function that takes two numbers and an operator (+, -, *, /) and returns the result".to_string(),
                    starter_code: Some("def calculator(a, b, operator):\n    # Your code here\n    pass".to_string()),
                    solution: Some("def calculator(a, b, operator):\n    if operator == \"+\":\n        return a + b\n    elif operator == \"-\":\n        return a - b\n    elif operator == \"*\":\n        return a * b\n    elif operator == \"/\":\n        return a / b if b != 0 else \"Cannot divide by zero\"".to_string()),
                    test_cases: vec![
                        "calculator(5, 3, \"+\") should return 8".to_string(),
                        "calculator(10, 2, \"/\") should return 5.0".to_string(),
                    ],
                },
                Exercise {
                    title: "Word Counter".to_string(),
                    description: "Write a function that counts the number of words in a sentence".to_string(),
                    starter_code: Some("def count_words(sentence):\n    # Your code here\n    pass".to_string()),
                    solution: Some("def count_words(sentence):\n    return len(sentence.split())".to_string()),
                    test_cases: vec![
                        "count_words(\"Hello world\") should return 2".to_string(),
                        "count_words(\"Python is awesome\") should return 3".to_string(),
                    ],
                },
            ],
        },
        ExerciseCategory {
            category: "Data Analysis".to_string(),
            level: "Intermediate".to_string(),
            exercises: vec![Exercise {
                title: "Sales Analysis".to_string(),
                description: "Given a list of sales data, calculate total revenue and average sale".to_string(),
                starter_code: Some("def analyze_sales(sales_data):\n    # sales_data = [{\"product\": \"A\", \"price\": 100, \"quantity\": 2}, ...]\n    # Return {\"total_revenue\": X, \"average_sale\": Y}\n    pass".to_string()),
                solution: Some("def analyze_sales(sales_data):\n    total_revenue = sum(item[\"price\"] * item[\"quantity\"] for item in sales_data)\n    average_sale = total_revenue / len(sales_data) if sales_data else 0\n    return {\"total_revenue\": total_revenue, \"average_sale\": average_sale}".to_string()),
                test_cases: vec![
                    "Should handle empty list".to_string(),
                    "Should calculate correct totals".to_string(),
                ],
            }],
        },
    ]
}

/// Builds the full seed catalog: sequential ids, and order indices running from 1
/// within each course.
pub fn seed_catalog() -> Catalog {
    let mut courses: Vec<Course> = Vec::new();
    let mut modules: Vec<Module> = Vec::new();

    for learn in LEARN_COURSES {
        let course_id = courses.len() as u32 + 1;
        courses.push(Course {
            id: course_id,
            title: learn.title.to_string(),
            domain: "Data Science".to_string(),
            level: learn.level.to_string(),
            duration_hours: normalize_hours(learn.total_duration),
            prerequisites: learn.prerequisites.to_string(),
            description: Some(learn.description.to_string()),
            source: KAGGLE_SOURCE.to_string(),
        });

        for (index, lesson) in learn.lessons.iter().enumerate() {
            modules.push(Module {
                id: modules.len() as u32 + 1,
                course_id,
                order: index as u32 + 1,
                title: lesson.title.to_string(),
                duration_minutes: lesson_minutes(lesson.duration),
                concepts: lesson.concepts.to_string(),
                example: None,
                level: None,
                source: Some(KAGGLE_SOURCE.to_string()),
            });
        }
    }

    for reference in REFERENCE_MODULES {
        let course_id = courses.len() as u32 + 1;
        courses.push(Course {
            id: course_id,
            title: format!("Python {}", reference.module),
            domain: "Programming".to_string(),
            level: "Beginner".to_string(),
            duration_hours: Some(REFERENCE_COURSE_HOURS),
            prerequisites: "None".to_string(),
            description: Some(format!("Learn {} in Python", reference.module)),
            source: PYTHON_DOCS_SOURCE.to_string(),
        });

        for (index, function) in reference.functions.iter().enumerate() {
            modules.push(Module {
                id: modules.len() as u32 + 1,
                course_id,
                order: index as u32 + 1,
                title: function.name.to_string(),
                duration_minutes: REFERENCE_FUNCTION_MINUTES,
                concepts: function.description.to_string(),
                example: Some(function.example.to_string()),
                level: Some(function.level.to_string()),
                source: Some(PYTHON_DOCS_SOURCE.to_string()),
            });
        }
    }

    Catalog {
        courses,
        modules,
        exercises: practice_exercises(),
    }
}
